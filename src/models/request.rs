use serde::Deserialize;

/// Body of `POST /api/book`, with the client field-name variants folded into
/// one shape. Nothing here is validated yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(default, alias = "hours")]
    pub duration: Option<DurationField>,
}

/// Clients send the duration either as a number or as free text like "2 hours".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Hours(i64),
    Text(String),
}

impl DurationField {
    /// The whole number of hours, or `None` when the text carries no digits
    /// or its number is signed or fractional.
    pub fn hours(&self) -> Option<i64> {
        match self {
            DurationField::Hours(h) => Some(*h),
            DurationField::Text(s) => {
                let start = s.find(|c: char| c.is_ascii_digit())?;
                if s[..start].ends_with('-') {
                    return None;
                }
                let rest = &s[start..];
                let end = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                let mut after = rest[end..].chars();
                if matches!(after.next(), Some('.' | ','))
                    && after.next().is_some_and(|c| c.is_ascii_digit())
                {
                    return None;
                }
                rest[..end].parse().ok()
            }
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, DurationField::Text(s) if s.trim().is_empty())
    }
}

impl BookingRequest {
    /// Required fields that are absent or blank, in request order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.phone) {
            missing.push("phone");
        }
        if is_blank(&self.date) {
            missing.push("date");
        }
        if is_blank(&self.start_time) {
            missing.push("start_time");
        }
        if self.duration.as_ref().map_or(true, DurationField::is_blank) {
            missing.push("duration");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
