//! Parses the five-column transaction CSV format used for bulk imports.
//!
//! Parsing is pure: no I/O, row failures are collected rather than thrown,
//! and every row that validates on its own is returned even when other rows
//! fail.

use crate::local_date::is_date_shaped;

/// The column names every import file must provide, in any order.
pub const REQUIRED_HEADERS: [&str; 5] = ["description", "category", "amount", "date", "is_public"];

/// One validated CSV row, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction.
    pub category: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The transaction date. Its `YYYY-MM-DD` shape is checked here, its
    /// calendar validity when the row is inserted.
    pub date: String,
    /// True only when the row says `true` or `1` (case-insensitive).
    /// Imported transactions are private by default.
    pub is_public: bool,
}

/// The outcome of parsing a CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvParseResult {
    /// True iff no row failed to parse.
    pub success: bool,
    /// Every row that validated, even when other rows failed.
    pub transactions: Vec<CsvTransaction>,
    /// One message per failed row, or a single message when the header was
    /// unusable and no rows were parsed at all.
    pub errors: Vec<String>,
}

impl CsvParseResult {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            transactions: Vec::new(),
            errors: vec![message],
        }
    }
}

/// Parse `text` as a transaction CSV file.
///
/// The first non-empty line must be a header containing the columns in
/// [REQUIRED_HEADERS] (any order, extra columns are ignored). Each following
/// non-blank line is parsed independently: a bad row is reported and skipped
/// without aborting the batch. Error messages carry the 1-based line number
/// of the offending row.
pub fn parse_csv(text: &str) -> CsvParseResult {
    let mut lines = text.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => return CsvParseResult::failure("CSV file is empty".to_owned()),
        }
    };

    let header: Vec<String> = split_csv_line(header)
        .iter()
        .map(|column| column.trim().to_lowercase())
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header.iter().any(|column| column == required))
        .collect();

    if !missing.is_empty() {
        return CsvParseResult::failure(format!(
            "Missing required headers: {}",
            missing.join(", ")
        ));
    }

    // The missing-header check above guarantees every position exists.
    let column_index = |name: &str| header.iter().position(|column| column == name).unwrap();
    let description_index = column_index("description");
    let category_index = column_index("category");
    let amount_index = column_index("amount");
    let date_index = column_index("date");
    let is_public_index = column_index("is_public");

    let mut transactions = Vec::new();
    let mut errors = Vec::new();

    for (line_index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let row = line_index + 1;
        let fields = split_csv_line(line);

        if fields.len() < REQUIRED_HEADERS.len() {
            errors.push(format!("Row {row}: insufficient columns"));
            continue;
        }

        let description = fields[description_index].trim();
        let category = fields[category_index].trim();
        let amount_text = fields[amount_index].trim();
        let date = fields[date_index].trim();

        if description.is_empty() {
            errors.push(format!("Row {row}: description is required"));
            continue;
        }

        if category.is_empty() {
            errors.push(format!("Row {row}: category is required"));
            continue;
        }

        let amount = match amount_text.parse::<f64>() {
            Ok(amount) if amount.is_finite() => amount,
            _ => {
                errors.push(format!("Row {row}: invalid amount \"{amount_text}\""));
                continue;
            }
        };

        if !is_date_shaped(date) {
            errors.push(format!("Row {row}: invalid date \"{date}\", use YYYY-MM-DD"));
            continue;
        }

        transactions.push(CsvTransaction {
            description: description.to_owned(),
            category: category.to_owned(),
            amount,
            date: date.to_owned(),
            is_public: parse_is_public(fields[is_public_index].trim()),
        });
    }

    CsvParseResult {
        success: errors.is_empty(),
        transactions,
        errors,
    }
}

/// Split one CSV line on commas, honouring double-quoted fields.
///
/// A quoted field may contain literal commas; `""` inside a quoted field is
/// an escaped quote character.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut characters = line.chars().peekable();

    while let Some(character) = characters.next() {
        match character {
            '"' if in_quotes && characters.peek() == Some(&'"') => {
                current.push('"');
                characters.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            character => current.push(character),
        }
    }

    fields.push(current);

    fields
}

/// Whether a raw CSV value opts a row into public visibility.
fn parse_is_public(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod csv_tests {
    use super::{CsvTransaction, parse_csv, split_csv_line};

    #[test]
    fn parses_a_single_valid_row() {
        let result = parse_csv(
            "description,category,amount,date,is_public\nCoffee,Food,-4.50,2024-03-01,true",
        );

        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.transactions,
            vec![CsvTransaction {
                description: "Coffee".to_owned(),
                category: "Food".to_owned(),
                amount: -4.50,
                date: "2024-03-01".to_owned(),
                is_public: true,
            }]
        );
    }

    #[test]
    fn header_columns_may_come_in_any_order() {
        let result = parse_csv(
            "is_public,date,amount,category,description\nfalse,2024-03-01,-4.50,Food,Coffee",
        );

        assert!(result.success);
        assert_eq!(result.transactions[0].description, "Coffee");
        assert!(!result.transactions[0].is_public);
    }

    #[test]
    fn missing_headers_fail_immediately_with_their_names() {
        let result = parse_csv("description,amount\nCoffee,-4.50");

        assert!(!result.success);
        assert!(result.transactions.is_empty());
        assert_eq!(
            result.errors,
            vec!["Missing required headers: category, date, is_public"]
        );
    }

    #[test]
    fn empty_input_is_a_failure() {
        let result = parse_csv("");

        assert!(!result.success);
        assert_eq!(result.errors, vec!["CSV file is empty"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let result = parse_csv(
            "\ndescription,category,amount,date,is_public\n\nCoffee,Food,-4.50,2024-03-01,true\n\n",
        );

        assert!(result.success);
        assert_eq!(result.transactions.len(), 1);
    }

    #[test]
    fn quoted_fields_may_contain_commas_and_escaped_quotes() {
        let result = parse_csv(
            "description,category,amount,date,is_public\n\"Dinner, drinks and a \"\"show\"\"\",Going Out,-120.0,2024-03-02,1",
        );

        assert!(result.success);
        assert_eq!(
            result.transactions[0].description,
            "Dinner, drinks and a \"show\""
        );
        assert!(result.transactions[0].is_public);
    }

    #[test]
    fn short_rows_get_a_positional_error() {
        let result = parse_csv("description,category,amount,date,is_public\nCoffee,Food,-4.50");

        assert!(!result.success);
        assert_eq!(result.errors, vec!["Row 2: insufficient columns"]);
    }

    #[test]
    fn bad_rows_do_not_abort_the_batch() {
        let result = parse_csv(
            "description,category,amount,date,is_public\n\
             Coffee,Food,-4.50,2024-03-01,true\n\
             ,Food,-1.00,2024-03-01,true\n\
             Lunch,,-8.00,2024-03-01,true\n\
             Snack,Food,not a number,2024-03-01,true\n\
             Dinner,Food,-20.00,03-01-2024,true\n\
             Tea,Food,-2.00,2024-03-02,false",
        );

        assert!(!result.success);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].description, "Coffee");
        assert_eq!(result.transactions[1].description, "Tea");
        assert_eq!(
            result.errors,
            vec![
                "Row 3: description is required",
                "Row 4: category is required",
                "Row 5: invalid amount \"not a number\"",
                "Row 6: invalid date \"03-01-2024\", use YYYY-MM-DD",
            ]
        );
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let result =
            parse_csv("description,category,amount,date,is_public\nCoffee,Food,NaN,2024-03-01,true");

        assert!(!result.success);
        assert_eq!(result.errors, vec!["Row 2: invalid amount \"NaN\""]);
    }

    #[test]
    fn syntactically_shaped_dates_are_accepted() {
        // Calendar validity is checked at insert time, not here.
        let result = parse_csv(
            "description,category,amount,date,is_public\nCoffee,Food,-4.50,2024-13-40,true",
        );

        assert!(result.success);
        assert_eq!(result.transactions[0].date, "2024-13-40");
    }

    #[test]
    fn visibility_defaults_to_private() {
        let result = parse_csv(
            "description,category,amount,date,is_public\n\
             A,Food,-1.00,2024-03-01,true\n\
             B,Food,-1.00,2024-03-01,TRUE\n\
             C,Food,-1.00,2024-03-01,1\n\
             D,Food,-1.00,2024-03-01,yes\n\
             E,Food,-1.00,2024-03-01,0\n\
             F,Food,-1.00,2024-03-01,",
        );

        assert!(result.success);
        let visibility: Vec<bool> = result
            .transactions
            .iter()
            .map(|transaction| transaction.is_public)
            .collect();
        assert_eq!(visibility, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn split_handles_quotes_and_empty_fields() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_csv_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_csv_line("\"a,b\",c"), vec!["a,b", "c"]);
        assert_eq!(split_csv_line("\"\"\"quoted\"\"\",c"), vec!["\"quoted\"", "c"]);
        assert_eq!(split_csv_line(""), vec![""]);
    }
}
