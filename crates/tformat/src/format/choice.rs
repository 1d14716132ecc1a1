use crate::format::error::PatternError;

/// A `choice` sub-format: labels selected by numeric limits.
///
/// Entries are separated by `|`. Each entry is a limit, a relation and a
/// label: `1#one` matches from 1 upward, `1<many` matches anything strictly
/// above 1 and `1≤one` is the same as `1#one`. Limits may be `∞` or `-∞`
/// and must ascend strictly. Labels are literal text.
///
/// # Example
///
/// ```
/// use tformat::ChoiceFormat;
///
/// let choice = ChoiceFormat::parse("0#no files|1#one file|1<many files").unwrap();
/// assert_eq!(choice.select(0.0), "no files");
/// assert_eq!(choice.select(1.0), "one file");
/// assert_eq!(choice.select(3.0), "many files");
/// assert_eq!(choice.select(-5.0), "no files");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceFormat {
    limits: Vec<f64>,
    labels: Vec<String>,
}

impl ChoiceFormat {
    pub fn parse(pattern: &str) -> Result<ChoiceFormat, PatternError> {
        let invalid = |message: String| PatternError::InvalidChoicePattern {
            pattern: pattern.to_string(),
            message,
        };

        let mut limits = Vec::<f64>::new();
        let mut labels = Vec::new();
        for entry in pattern.split('|') {
            let Some(split) = entry.find(['#', '<', '≤']) else {
                return Err(invalid(format!("missing relation in '{entry}'")));
            };
            let relation = entry[split..].chars().next().unwrap_or('#');
            let label = &entry[split + relation.len_utf8()..];
            let limit_text = entry[..split].trim();

            let limit = parse_limit(limit_text)
                .ok_or_else(|| invalid(format!("invalid limit '{limit_text}'")))?;
            let limit = if relation == '<' { next_up(limit) } else { limit };

            if limits.last().is_some_and(|previous| limit <= *previous) {
                return Err(invalid("limits must be in ascending order".to_string()));
            }
            limits.push(limit);
            labels.push(label.to_string());
        }

        Ok(ChoiceFormat { limits, labels })
    }

    /// The label for `number`: the last entry whose limit is at most
    /// `number`, or the first entry when `number` is below every limit.
    pub fn select(&self, number: f64) -> &str {
        let index = self
            .limits
            .iter()
            .take_while(|limit| number >= **limit)
            .count();
        self.labels
            .get(index.saturating_sub(1))
            .map_or("", String::as_str)
    }
}

fn parse_limit(text: &str) -> Option<f64> {
    match text {
        "∞" | "+∞" => Some(f64::INFINITY),
        "-∞" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok().filter(|limit| !limit.is_nan()),
    }
}

/// The smallest double greater than `value`.
fn next_up(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        return value;
    }
    if value == 0.0 {
        return f64::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}
