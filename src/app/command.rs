use crate::app::session::Action;
use crate::core::filter::CourseFilter;
use crate::domain::model::Rating;
use crate::utils::error::{CatalogError, Result};

/// One line of the interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Subjects,
    List,
    Cart,
    Completed,
    Show(String),
    Act(Action),
}

pub const HELP: &str = "\
Commands:
  subjects                 list subjects
  subject <name>           filter by subject (`All` for every subject)
  search [text]            filter by text; no text clears the search
  clear                    reset subject and search
  list                     show the filtered courses
  show <number>            show one course in full
  expand <number>          show or hide a course description
  sections <number>        view sections and subsections
  close                    close the sections view
  add <number>             add a course to the cart
  remove <number>          remove a course from the cart
  toggle <number>          add or remove a course
  cart                     show the cart
  completed                show completed courses
  rate <number> <1-5>      rate a completed course
  help                     show this help
  quit                     leave the session";

impl Command {
    /// Parses a command line. Course numbers and subjects may contain
    /// spaces; they take the rest of the line.
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, squash_whitespace(rest)),
            None => (line, String::new()),
        };

        let invalid = |reason: &str| CatalogError::InvalidCommand {
            input: line.to_string(),
            reason: reason.to_string(),
        };
        let required = |what: &str| -> Result<String> {
            if rest.is_empty() {
                Err(invalid(&format!("expected {}", what)))
            } else {
                Ok(rest.clone())
            }
        };

        let command = match verb.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "subjects" => Command::Subjects,
            "list" => Command::List,
            "cart" => Command::Cart,
            "completed" => Command::Completed,
            "show" => Command::Show(required("a course number")?),
            "subject" => Command::Act(Action::SetSubject(required("a subject")?)),
            "search" => Command::Act(Action::SetQuery(rest.clone())),
            "clear" => Command::Act(Action::Filter(CourseFilter::default())),
            "expand" => Command::Act(Action::ToggleExpanded(required("a course number")?)),
            "sections" => Command::Act(Action::OpenSections(required("a course number")?)),
            "close" => Command::Act(Action::CloseSections),
            "add" => Command::Act(Action::AddToCart(required("a course number")?)),
            "remove" => Command::Act(Action::RemoveFromCart(required("a course number")?)),
            "toggle" => Command::Act(Action::ToggleCart(required("a course number")?)),
            "rate" => {
                let (number, value) = rest
                    .rsplit_once(' ')
                    .ok_or_else(|| invalid("expected a course number and a rating"))?;
                let value: i64 = value
                    .parse()
                    .map_err(|_| invalid("rating must be a whole number"))?;
                Command::Act(Action::Rate {
                    number: number.to_string(),
                    rating: Rating::new(value)?,
                })
            }
            "" => return Err(invalid("empty command")),
            _ => return Err(invalid("unknown command")),
        };

        Ok(command)
    }
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("  QUIT ").unwrap(), Command::Quit);
        assert_eq!(Command::parse("cart").unwrap(), Command::Cart);
        assert_eq!(
            Command::parse("close").unwrap(),
            Command::Act(Action::CloseSections)
        );
    }

    #[test]
    fn test_arguments_take_rest_of_line() {
        assert_eq!(
            Command::parse("add COMP SCI   200").unwrap(),
            Command::Act(Action::AddToCart("COMP SCI 200".to_string()))
        );
        assert_eq!(
            Command::parse("subject Computer Science").unwrap(),
            Command::Act(Action::SetSubject("Computer Science".to_string()))
        );
        assert_eq!(
            Command::parse("search").unwrap(),
            Command::Act(Action::SetQuery(String::new()))
        );
    }

    #[test]
    fn test_rate_parses_trailing_rating() {
        assert_eq!(
            Command::parse("rate COMP SCI 200 4").unwrap(),
            Command::Act(Action::Rate {
                number: "COMP SCI 200".to_string(),
                rating: Rating::new(4).unwrap(),
            })
        );
        assert!(matches!(
            Command::parse("rate CS200 9"),
            Err(CatalogError::InvalidRating { value: 9 })
        ));
        assert!(matches!(
            Command::parse("rate CS200 great"),
            Err(CatalogError::InvalidCommand { .. })
        ));
        assert!(matches!(
            Command::parse("rate 4"),
            Err(CatalogError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(
            Command::parse(""),
            Err(CatalogError::InvalidCommand { .. })
        ));
        assert!(matches!(
            Command::parse("enroll CS200"),
            Err(CatalogError::InvalidCommand { .. })
        ));
        assert!(matches!(
            Command::parse("add"),
            Err(CatalogError::InvalidCommand { .. })
        ));
    }
}
