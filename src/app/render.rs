use crate::app::session::Session;
use crate::domain::model::{format_credits, Course};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// How much of a course card to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    /// Search results and cart entries.
    Catalog,
    /// Completed courses: no sections, rating shown.
    Completed,
}

pub fn completed_title(needs_rating: usize) -> String {
    format!("Completed Courses ({} needs rating)", needs_rating)
}

pub fn render_subjects(subjects: &[String]) -> String {
    subjects.join("\n")
}

pub fn render_card(course: &Course, expanded: bool, mode: CardMode) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", course.name));
    out.push_str(&format!("  {} · {}\n", course.number, course.credits_label()));
    if expanded && !course.description.is_empty() {
        out.push_str(&format!("  {}\n", course.description));
    }
    out.push_str(&format!("  Requisites: {}\n", course.requisites_summary()));
    if !course.keywords.is_empty() {
        out.push_str(&format!("  Keywords: {}\n", course.keywords_summary()));
    }
    match mode {
        CardMode::Catalog => {
            if !course.sections.is_empty() {
                out.push_str(&format!("  Sections: {}\n", course.sections.len()));
            }
        }
        CardMode::Completed => {
            let rating = course
                .rating
                .map(|r| format!("{} ({})", r.stars(), r))
                .unwrap_or_else(|| "not rated".to_string());
            out.push_str(&format!("  Rating: {}\n", rating));
        }
    }
    out
}

pub fn render_cards(session: &Session, courses: &[Course], mode: CardMode) -> String {
    if courses.is_empty() {
        return "No courses.\n".to_string();
    }
    courses
        .iter()
        .map(|c| render_card(c, session.is_expanded(&c.number), mode))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sections of a course with their subsections nested underneath.
pub fn render_sections(course: &Course) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} sections\n", course.name));
    if course.sections.is_empty() {
        out.push_str("  No sections listed.\n");
        return out;
    }

    for section in &course.sections {
        out.push_str(&format!("  {}\n", section.number));
        if let Some(instructor) = &section.instructor {
            out.push_str(&format!("    Instructor: {}\n", instructor));
        }
        if let Some(location) = &section.location {
            out.push_str(&format!("    Location: {}\n", location));
        }
        if !section.time.is_empty() {
            out.push_str(&format!("    Meets: {}\n", section.time.summary()));
        }
        for subsection in &section.subsections {
            out.push_str(&format!("    - {}", subsection.number));
            if let Some(location) = &subsection.location {
                out.push_str(&format!(" @ {}", location));
            }
            if !subsection.time.is_empty() {
                out.push_str(&format!(" ({})", subsection.time.summary()));
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_cart(session: &Session) -> String {
    let cart = session.cart();
    let mut out = format!(
        "Cart: {} course(s), {} credits\n",
        cart.len(),
        format_credits(cart.total_credits())
    );
    if !cart.is_empty() {
        out.push('\n');
        out.push_str(&render_cards(session, cart.courses(), CardMode::Catalog));
    }
    out
}

pub fn render_completed(session: &Session) -> String {
    let mut out = format!("{}\n", completed_title(session.needs_rating_count()));
    let unresolved = session.catalog().unresolved();
    if !unresolved.is_empty() {
        out.push_str(&format!("Not in catalog: {}\n", unresolved.join(", ")));
    }
    out.push('\n');
    out.push_str(&render_cards(session, session.completed(), CardMode::Completed));
    out
}

#[derive(Serialize)]
struct CsvRow<'a> {
    number: &'a str,
    name: &'a str,
    subject: &'a str,
    credits: f64,
    requisites: String,
    keywords: String,
    rating: Option<u8>,
}

/// Writes a course listing in `format` to `writer`.
pub fn write_courses<W: Write>(mut writer: W, courses: &[Course], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for course in courses {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    course.number,
                    course.name,
                    course.subject,
                    format_credits(course.credits)
                )?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, courses)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for course in courses {
                csv.serialize(CsvRow {
                    number: &course.number,
                    name: &course.name,
                    subject: &course.subject,
                    credits: course.credits,
                    requisites: course.requisites_summary(),
                    keywords: course.keywords_summary(),
                    rating: course.rating.map(u8::from),
                })?;
            }
            csv.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogStore;
    use crate::domain::model::{Rating, Schedule, Section, Subsection};

    fn course() -> Course {
        Course {
            number: "CS200".to_string(),
            name: "Programming I".to_string(),
            subject: "CS".to_string(),
            credits: 3.0,
            description: "Learn to program.".to_string(),
            keywords: vec!["java".to_string(), "intro".to_string()],
            requisites: vec![vec!["MATH112".to_string(), "MATH114".to_string()]],
            sections: vec![Section {
                number: "LEC 001".to_string(),
                instructor: Some("Ada".to_string()),
                location: Some("1240 CS".to_string()),
                time: Schedule(vec![("monday".to_string(), "9:55am - 10:45am".to_string())]),
                subsections: vec![Subsection {
                    number: "LAB 311".to_string(),
                    location: Some("1370 CS".to_string()),
                    time: Schedule::default(),
                }],
            }],
            rating: None,
        }
    }

    #[test]
    fn test_card_hides_description_until_expanded() {
        let collapsed = render_card(&course(), false, CardMode::Catalog);
        assert!(collapsed.contains("CS200 · 3 Credits"));
        assert!(collapsed.contains("Requisites: (MATH112 OR MATH114)"));
        assert!(collapsed.contains("Keywords: java, intro"));
        assert!(!collapsed.contains("Learn to program."));

        let expanded = render_card(&course(), true, CardMode::Catalog);
        assert!(expanded.contains("Learn to program."));
    }

    #[test]
    fn test_completed_card_shows_rating() {
        let mut rated = course();
        rated.rating = Some(Rating::new(4).unwrap());
        assert!(render_card(&rated, false, CardMode::Completed).contains("★★★★☆ (4/5)"));
        assert!(render_card(&course(), false, CardMode::Completed).contains("not rated"));
    }

    #[test]
    fn test_sections_listing() {
        let text = render_sections(&course());
        assert!(text.contains("LEC 001"));
        assert!(text.contains("Instructor: Ada"));
        assert!(text.contains("Meets: monday 9:55am - 10:45am"));
        assert!(text.contains("- LAB 311 @ 1370 CS"));
    }

    #[test]
    fn test_completed_title() {
        assert_eq!(completed_title(2), "Completed Courses (2 needs rating)");
    }

    #[test]
    fn test_cart_summary() {
        let session = Session::new(CatalogStore::new(vec![course()]));
        assert!(render_cart(&session).starts_with("Cart: 0 course(s), 0 credits"));
    }

    #[test]
    fn test_write_courses_csv_and_json() {
        let courses = vec![course()];

        let mut csv_out = Vec::new();
        write_courses(&mut csv_out, &courses, OutputFormat::Csv).unwrap();
        let csv_text = String::from_utf8(csv_out).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next(),
            Some("number,name,subject,credits,requisites,keywords,rating")
        );
        assert_eq!(
            lines.next(),
            Some("CS200,Programming I,CS,3.0,(MATH112 OR MATH114),\"java, intro\",")
        );

        let mut json_out = Vec::new();
        write_courses(&mut json_out, &courses, OutputFormat::Json).unwrap();
        let parsed: Vec<Course> = serde_json::from_slice(&json_out).unwrap();
        assert_eq!(parsed, courses);
    }
}
