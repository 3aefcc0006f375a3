use crate::app::command::{Command, HELP};
use crate::app::render::{
    render_card, render_cards, render_cart, render_completed, render_sections, render_subjects,
    CardMode,
};
use crate::app::session::{Action, Session};
use crate::utils::error::{CatalogError, Result};
use std::io::{BufRead, Write};

/// Reads commands from `input` until `quit` or end of input and returns the
/// last snapshot. Command errors are reported on `output` and the session
/// continues.
pub fn run_session<R: BufRead, W: Write>(
    mut session: Session,
    mut input: R,
    mut output: W,
) -> Result<Session> {
    writeln!(
        output,
        "{} courses loaded. Type `help` for commands.",
        session.catalog().courses().len()
    )?;
    prompt(&mut output)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD so the command still gets a reply.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            prompt(&mut output)?;
            continue;
        }

        match Command::parse(line) {
            Ok(Command::Quit) => break,
            Ok(command) => match execute(&session, command) {
                Ok((next, text)) => {
                    session = next;
                    write!(output, "{}", text)?;
                }
                Err(e) => report(&mut output, &e)?,
            },
            Err(e) => report(&mut output, &e)?,
        }
        prompt(&mut output)?;
    }

    writeln!(output)?;
    output.flush()?;
    Ok(session)
}

/// Runs one command, returning the next snapshot and the text to show.
pub fn execute(session: &Session, command: Command) -> Result<(Session, String)> {
    let text = match command {
        Command::Help => format!("{}\n", HELP),
        Command::Quit => String::new(),
        Command::Subjects => format!("{}\n", render_subjects(session.catalog().subjects())),
        Command::List => listing(session),
        Command::Cart => render_cart(session),
        Command::Completed => render_completed(session),
        Command::Show(number) => {
            let course = session
                .catalog()
                .find(&number)
                .ok_or(CatalogError::UnknownCourse { number })?;
            render_card(course, true, CardMode::Catalog)
        }
        Command::Act(action) => {
            let next = session.apply(action.clone())?;
            let text = describe(&next, &action);
            return Ok((next, text));
        }
    };
    Ok((session.clone(), text))
}

fn listing(session: &Session) -> String {
    let filter = session.filter();
    let mut header = format!("Subject: {}", filter.subject);
    if !filter.query.trim().is_empty() {
        header.push_str(&format!(", search: \"{}\"", filter.query.trim()));
    }
    format!(
        "{} ({} of {})\n\n{}",
        header,
        session.filtered().len(),
        session.catalog().courses().len(),
        render_cards(session, session.filtered(), CardMode::Catalog)
    )
}

fn describe(session: &Session, action: &Action) -> String {
    match action {
        Action::SetSubject(_) | Action::SetQuery(_) | Action::Filter(_) => listing(session),
        Action::AddToCart(number) | Action::RemoveFromCart(number) | Action::ToggleCart(number) => {
            let state = if session.cart().contains(number) {
                "in cart"
            } else {
                "not in cart"
            };
            format!("{} is {} ({} in cart)\n", number, state, session.cart().len())
        }
        Action::Rate { number, rating } => format!(
            "Rated {} {}. {} course(s) still need a rating.\n",
            number,
            rating,
            session.needs_rating_count()
        ),
        Action::ToggleExpanded(number) => {
            let expanded = session.is_expanded(number);
            match session.completed().iter().find(|c| &c.number == number) {
                Some(course) => render_card(course, expanded, CardMode::Completed),
                None => session
                    .catalog()
                    .find(number)
                    .map(|c| render_card(c, expanded, CardMode::Catalog))
                    .unwrap_or_default(),
            }
        }
        Action::OpenSections(_) => session
            .open_sections()
            .map(render_sections)
            .unwrap_or_default(),
        Action::CloseSections => "Sections closed.\n".to_string(),
    }
}

fn prompt<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

fn report<W: Write>(output: &mut W, error: &CatalogError) -> Result<()> {
    tracing::debug!("Command failed: {}", error);
    writeln!(output, "❌ {}", error.user_friendly_message())?;
    writeln!(output, "💡 {}", error.recovery_suggestion())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{resolve_completed, CatalogStore};
    use crate::domain::model::Course;
    use std::io::Cursor;

    fn course(number: &str, subject: &str) -> Course {
        Course {
            number: number.to_string(),
            name: format!("{} name", number),
            subject: subject.to_string(),
            credits: 4.0,
            description: format!("{} description", number),
            keywords: Vec::new(),
            requisites: Vec::new(),
            sections: Vec::new(),
            rating: None,
        }
    }

    fn session() -> Session {
        let courses = vec![course("CS200", "CS"), course("MATH221", "MATH")];
        let completed = resolve_completed(&courses, &["CS200".to_string()]);
        Session::new(CatalogStore::new(courses).with_completed(completed))
    }

    fn run(script: &str) -> (Session, String) {
        let mut output = Vec::new();
        let session = run_session(session(), Cursor::new(script), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_script_updates_state() {
        let (session, output) = run("add MATH221\nadd MATH221\nrate CS200 5\nquit\nadd CS200\n");

        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.needs_rating_count(), 0);
        assert!(output.contains("MATH221 is in cart (1 in cart)"));
        assert!(output.contains("Rated CS200 5/5. 0 course(s) still need a rating."));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (session, output) = run("frobnicate\nadd BIO101\nsubject MATH\n");

        assert!(output.contains("Type `help` for the list of commands"));
        assert!(output.contains("No course numbered BIO101"));
        assert!(output.contains("Subject: MATH (1 of 2)"));
        assert_eq!(session.filtered().len(), 1);
    }

    #[test]
    fn test_completed_view_shows_needs_rating_title() {
        let (_, output) = run("completed\n");
        assert!(output.contains("Completed Courses (1 needs rating)"));
    }

    #[test]
    fn test_expand_shows_description() {
        let (session, output) = run("expand MATH221\n");
        assert!(session.is_expanded("MATH221"));
        assert!(output.contains("MATH221 description"));
    }

    #[test]
    fn test_expand_completed_course_shows_rating() {
        let (_, output) = run("rate CS200 4\nexpand CS200\n");
        assert!(output.contains("Rating: ★★★★☆ (4/5)"));
        assert!(!output.contains("Sections:"));
    }

    #[test]
    fn test_undecodable_line_does_not_end_session() {
        let mut output = Vec::new();
        let input: &[u8] = b"list\nsearch \xff\xfe\nadd MATH221\r\n";
        let session = run_session(session(), input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Subject: All, search: \"\u{fffd}\u{fffd}\" (0 of 2)"));
        assert!(output.contains("MATH221 is in cart (1 in cart)"));
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_execute_show_unknown_course() {
        let err = execute(&session(), Command::Show("CS999".to_string())).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCourse { .. }));
    }
}
