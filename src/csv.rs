// src/csv.rs
use std::io::{self, Write};

use crate::table::DataSet;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Whole table as delimited text, header line first.
pub fn to_export_string(table: &DataSet, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    // Vec<u8> writes are infallible
    let _ = write_row(&mut buf, &table.headers, sep);
    for row in table.text_rows() {
        let _ = write_row(&mut buf, &row, sep);
    }

    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        let row = vec![s!("plain"), s!("a,b"), s!("say \"hi\""), s!("two\nlines")];
        write_row(&mut buf, &row, ',').unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "plain,\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
        );
    }

    #[test]
    fn tab_separator_leaves_commas_alone() {
        let mut buf = Vec::new();
        write_row(&mut buf, &[s!("a,b"), s!("c")], '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\tc\n");
    }

    #[test]
    fn header_then_rows() {
        let table = DataSet {
            headers: vec![s!("player_name"), s!("salary")],
            rows: vec![
                vec![Cell::Text(s!("Curry, Stephen")), Cell::Int(55_761_216)],
                vec![Cell::Text(s!("Nobody")), Cell::Int(0)],
            ],
        };
        assert_eq!(
            to_export_string(&table, ','),
            "player_name,salary\n\"Curry, Stephen\",55761216\nNobody,0\n"
        );
    }
}
