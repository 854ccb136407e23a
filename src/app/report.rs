use crate::app::event_loop::TraceRow;
use crate::utils::error::Result;
use std::io::Write;

pub fn write_json<W: Write>(writer: W, trace: &[TraceRow]) -> Result<()> {
    serde_json::to_writer_pretty(writer, trace)?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, trace: &[TraceRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in trace {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_table<W: Write>(mut writer: W, trace: &[TraceRow]) -> Result<()> {
    writeln!(
        writer,
        "{:>7}  {:<28} {:>8}  {:<8} {:<12} {:>8}  {:<6} {:<5} note",
        "at_ms", "trigger", "scroll", "navbar", "active", "revealed", "skills", "menu"
    )?;
    for row in trace {
        writeln!(
            writer,
            "{:>7}  {:<28} {:>8.0}  {:<8} {:<12} {:>8}  {:<6} {:<5} {}",
            row.at_ms,
            row.trigger,
            row.scroll_y,
            if row.navbar_scrolled { "scrolled" } else { "-" },
            if row.active_section.is_empty() { "-" } else { row.active_section.as_str() },
            row.revealed,
            if row.skills_filled { "filled" } else { "-" },
            if row.menu_open { "open" } else { "-" },
            row.note
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TraceRow> {
        vec![TraceRow {
            at_ms: 0,
            trigger: "load".to_string(),
            scroll_y: 0.0,
            navbar_scrolled: false,
            active_section: "home".to_string(),
            revealed: 2,
            skills_filled: false,
            menu_open: false,
            note: "scheduled 3 timers".to_string(),
        }]
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &rows()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(concat!(
                "at_ms,trigger,scroll_y,navbar_scrolled,active_section,",
                "revealed,skills_filled,menu_open,note"
            ))
        );
        assert_eq!(lines.next(), Some("0,load,0.0,false,home,2,false,false,scheduled 3 timers"));
    }

    #[test]
    fn test_table_marks_inactive_values() {
        let mut buffer = Vec::new();
        let mut trace = rows();
        trace[0].active_section.clear();
        write_table(&mut buffer, &trace).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.lines().nth(1).unwrap().contains("load"));
        assert!(text.contains("scheduled 3 timers"));
    }
}
