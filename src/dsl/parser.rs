//! Parser for the scene DSL.

use std::collections::HashSet;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{RelaxError, Result};

/// Parser for scene DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire scene description.
    pub fn parse(&mut self) -> Result<SceneAst> {
        let mut ast = SceneAst::new();
        let mut names = HashSet::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {}
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier if is_region_keyword(&self.current.text) => {
                    let region = self.parse_region()?;
                    if !names.insert(region.name.clone()) {
                        return Err(RelaxError::DuplicateRegion { name: region.name });
                    }
                    ast.regions.push(region);
                }
                _ => {
                    return Err(RelaxError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(RelaxError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(RelaxError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| RelaxError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn parse_directive(&mut self, ast: &mut SceneAst) -> Result<()> {
        let name = self.current.text.clone();
        let line = self.current.line;
        let directive = Directive::from_name(&name)
            .ok_or_else(|| RelaxError::parse(line, format!("unknown directive: {}", name)))?;
        self.advance()?;

        let mut args = Vec::with_capacity(directive.arg_count());
        for _ in 0..directive.arg_count() {
            args.push(self.expect_number()?);
        }

        // Repeated directives overwrite earlier ones
        match directive {
            Directive::Viewport => {
                ast.viewport = Some((count(args[0], line)?, count(args[1], line)?))
            }
            Directive::Downsample => ast.downsample = Some(count(args[0], line)?),
            Directive::Grid => ast.grid = Some((count(args[0], line)?, count(args[1], line)?)),
            Directive::Center => ast.center = Some((args[0], args[1])),
            Directive::Scale => ast.scale = Some(args[0]),
            Directive::Omega => ast.omega = Some(args[0]),
            Directive::MaxError => ast.max_error = Some(args[0]),
            Directive::MaxPotential => ast.max_potential = Some(args[0]),
        }

        Ok(())
    }

    fn parse_region(&mut self) -> Result<RegionDef> {
        let line = self.current.line;
        self.advance()?;

        let name = self.expect(TokenKind::Identifier)?.text;
        let tl = (self.expect_number()?, self.expect_number()?);
        let br = (self.expect_number()?, self.expect_number()?);
        let potential = self.expect_number()?;

        Ok(RegionDef {
            name,
            tl,
            br,
            potential,
            line,
        })
    }
}

/// Convert a directive argument to a sample or pixel count.
fn count(value: f64, line: usize) -> Result<usize> {
    if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(RelaxError::parse(
            line,
            format!("expected a non-negative integer, got {}", value),
        ));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        let ast = super::super::parse("RECT anode -5 5 5 -5 100k").unwrap();
        assert_eq!(ast.regions.len(), 1);
        let r = &ast.regions[0];
        assert_eq!(r.name, "anode");
        assert_eq!(r.tl, (-5.0, 5.0));
        assert_eq!(r.br, (5.0, -5.0));
        assert_eq!(r.potential, 100_000.0);
        assert_eq!(r.line, 1);
    }

    #[test]
    fn test_parse_directives() {
        let input = ".viewport 800 500\n.downsample 2\n.center 15 0\n.scale 50\n.omega 1.9\n.maxerror 0.1\n.maxpot 100k\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.viewport, Some((800, 500)));
        assert_eq!(ast.downsample, Some(2));
        assert_eq!(ast.center, Some((15.0, 0.0)));
        assert_eq!(ast.scale, Some(50.0));
        assert_eq!(ast.omega, Some(1.9));
        assert_eq!(ast.max_error, Some(0.1));
        assert_eq!(ast.max_potential, Some(100_000.0));
        assert_eq!(ast.grid, None);
    }

    #[test]
    fn test_region_order_preserved() {
        let input = "REGION b 0 1 1 0 2\nrect a 0 1 1 0 1\n";
        let ast = super::super::parse(input).unwrap();
        let names: Vec<_> = ast.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# Plates\nRECT p 0 1 1 0 5 ; the only plate\n\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.regions.len(), 1);
    }

    #[test]
    fn test_duplicate_region_rejected() {
        let input = "RECT p 0 1 1 0 5\nRECT p 2 3 3 2 5\n";
        let err = super::super::parse(input).unwrap_err();
        assert!(matches!(err, RelaxError::DuplicateRegion { ref name } if name == "p"));
    }

    #[test]
    fn test_unknown_directive() {
        let err = super::super::parse(".gravity 9.81").unwrap_err();
        assert!(matches!(err, RelaxError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_and_extra_arguments() {
        assert!(super::super::parse("RECT p 0 1 1 0").is_err());
        assert!(super::super::parse(".grid 3").is_err());
        assert!(super::super::parse(".scale 1 2").is_err());
    }

    #[test]
    fn test_fractional_count_rejected() {
        let err = super::super::parse("\n.grid 3.5 2").unwrap_err();
        assert!(matches!(err, RelaxError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_bare_identifier_rejected() {
        assert!(super::super::parse("anode 0 1 1 0 5").is_err());
    }
}
