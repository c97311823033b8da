use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::NotationError;

/// Untyped parse tree of the notation: `name(key:value, ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `_`
    Missing,
    Atom(String),
    /// `'Paris` or `'"New York"`
    Literal(String),
    Call { name: String, args: Vec<Arg> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub key: Option<String>,
    pub value: Expr,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '+')
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

fn literal(input: &str) -> IResult<&str, Expr> {
    map(
        preceded(
            char('\''),
            alt((
                delimited(char('"'), is_not("\""), char('"')),
                take_while1(|c: char| !c.is_whitespace() && !matches!(c, ',' | '(' | ')')),
            )),
        ),
        |text: &str| Expr::Literal(text.to_string()),
    )(input)
}

fn call_or_atom(input: &str) -> IResult<&str, Expr> {
    let (input, name) = ident(input)?;
    let (input, args) = opt(delimited(
        preceded(multispace0, char('(')),
        separated_list0(char(','), arg),
        preceded(multispace0, char(')')),
    ))(input)?;

    let expr = match args {
        Some(args) => Expr::Call { name: name.to_string(), args },
        None if name == "_" => Expr::Missing,
        None => Expr::Atom(name.to_string()),
    };
    Ok((input, expr))
}

fn arg(input: &str) -> IResult<&str, Arg> {
    let (input, _) = multispace0(input)?;
    let (input, key) = opt(terminated(ident, preceded(multispace0, char(':'))))(input)?;
    let (input, value) = delimited(multispace0, expr, multispace0)(input)?;
    Ok((input, Arg { key: key.map(str::to_string), value }))
}

pub fn expr(input: &str) -> IResult<&str, Expr> {
    alt((literal, call_or_atom))(input)
}

/// Parses one complete expression; trailing input is an error.
pub fn parse_expr(source: &str) -> Result<Expr, NotationError> {
    match all_consuming(delimited(multispace0, expr, multispace0))(source) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let offset = source.len() - e.input.len();
            let found = e.input.chars().take(12).collect();
            Err(NotationError::Syntax { offset, found })
        }
        Err(nom::Err::Incomplete(_)) => Err(NotationError::Syntax { offset: source.len(), found: String::new() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> Expr {
        Expr::Atom(s.to_string())
    }

    #[test]
    fn test_nested_calls_and_keys() {
        let parsed = parse_expr("clause(past+perfect, eat(agent:pron(he), patient:_))").unwrap();
        let Expr::Call { name, args } = parsed else { panic!("expected a call") };
        assert_eq!(name, "clause");
        assert_eq!(args[0], Arg { key: None, value: atom("past+perfect") });

        let Expr::Call { name, args } = &args[1].value else { panic!("expected a call") };
        assert_eq!(name, "eat");
        assert_eq!(args[0].key.as_deref(), Some("agent"));
        assert_eq!(args[1], Arg { key: Some("patient".to_string()), value: Expr::Missing });
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_expr("'Paris").unwrap(), Expr::Literal("Paris".to_string()));
        assert_eq!(parse_expr("'\"New York\"").unwrap(), Expr::Literal("New York".to_string()));
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let tight = parse_expr("np(apple,the,adj:red)").unwrap();
        let loose = parse_expr("  np( apple , the , adj : red )  ").unwrap();
        assert_eq!(tight, loose);
        assert_eq!(parse_expr("f()").unwrap(), Expr::Call { name: "f".to_string(), args: vec![] });
    }

    #[test]
    fn test_syntax_errors_carry_the_offset() {
        let err = parse_expr("clause(eat,").unwrap_err();
        assert!(matches!(err, NotationError::Syntax { .. }));

        let err = parse_expr("eat) trailing").unwrap_err();
        assert_eq!(err, NotationError::Syntax { offset: 3, found: ") trailing".to_string() });
    }
}
