use thiserror::Error;

/// The four top-level fields of a `=SERIES(name, x-range, y-range, order)`
/// generating formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesFormula {
    /// Name argument with a surrounding double-quote pair stripped.
    pub name: String,
    /// X (category) range argument, verbatim.
    pub x_values: String,
    /// Y (value) range argument, verbatim.
    pub y_values: String,
    /// 0-based series index (the trailing 1-based ordinal minus one).
    pub index: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesFormulaError {
    #[error("not a SERIES formula: {0:?}")]
    NotSeries(String),
    #[error("expected 4 arguments in SERIES formula, found {found}: {formula:?}")]
    ArgumentCount { formula: String, found: usize },
    #[error("invalid series order {order:?} in formula {formula:?}")]
    InvalidOrder { formula: String, order: String },
}

/// Placeholder for commas that are not field separators. The source text is a
/// formula, so a control character can never occur in it naturally.
const MASK: char = '\u{1}';

/// Split a series generating formula into its four top-level fields.
///
/// Commas inside parenthesized sub-expressions (e.g. 3-D references like
/// `(Sheet1!A1,Sheet1!B1)`) or brace-delimited array literals (`{1,2,3}`) are
/// not separators and are protected before the top-level split.
pub fn split_series_formula(formula: &str) -> Result<SeriesFormula, SeriesFormulaError> {
    let trimmed = formula.trim();
    let body = trimmed
        .strip_prefix("=SERIES(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| SeriesFormulaError::NotSeries(formula.to_string()))?;

    let masked = mask_protected_commas(body);
    let fields: Vec<&str> = masked.split(',').collect();
    if fields.len() != 4 {
        return Err(SeriesFormulaError::ArgumentCount {
            formula: formula.to_string(),
            found: fields.len(),
        });
    }

    let unmask = |field: &str| field.replace(MASK, ",");

    let name = unquote(&unmask(fields[0]));
    let x_values = unmask(fields[1]);
    let y_values = unmask(fields[2]);

    let order: i64 =
        fields[3]
            .trim()
            .parse()
            .map_err(|_| SeriesFormulaError::InvalidOrder {
                formula: formula.to_string(),
                order: fields[3].to_string(),
            })?;

    Ok(SeriesFormula {
        name,
        x_values,
        y_values,
        index: order - 1,
    })
}

fn mask_protected_commas(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut paren_depth = 0usize;
    let mut in_braces = false;
    for c in body.chars() {
        match c {
            '(' => {
                paren_depth += 1;
                out.push(c);
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(c);
            }
            '{' => {
                in_braces = true;
                out.push(c);
            }
            '}' => {
                in_braces = false;
                out.push(c);
            }
            ',' if paren_depth > 0 || in_braces => out.push(MASK),
            _ => out.push(c),
        }
    }
    out
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|inner| !inner.is_empty());
    match stripped {
        Some(inner) => inner.to_string(),
        None => value.to_string(),
    }
}
