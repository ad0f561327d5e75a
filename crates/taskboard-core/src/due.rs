use chrono::{
  NaiveDate,
  NaiveDateTime,
  NaiveTime
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DueState {
  Overdue,
  Soon,
  Later,
  None
}

impl DueState {
  pub fn css_class(
    self
  ) -> Option<&'static str> {
    match self {
      | DueState::Overdue => Some("overdue"),
      | DueState::Soon => Some("due-soon"),
      | DueState::Later | DueState::None => {
        None
      }
    }
  }
}

/// Accepts `YYYY-MM-DD`, optionally
/// followed by ` HH:MM` or `THH:MM`.
pub fn parse_due(
  raw: &str
) -> Option<(NaiveDate, Option<NaiveTime>)>
{
  let raw = raw.trim();
  if let Ok(date) =
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
  {
    return Some((date, None));
  }

  ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|format| {
      NaiveDateTime::parse_from_str(
        raw, format
      )
      .ok()
    })
    .map(|datetime| {
      (datetime.date(), Some(datetime.time()))
    })
}

pub fn due_state(
  due_date: Option<&str>,
  today: NaiveDate,
  lead_days: u32
) -> DueState {
  let Some((date, _)) =
    due_date.and_then(parse_due)
  else {
    return DueState::None;
  };

  let days_left =
    (date - today).num_days();
  if days_left < 0 {
    DueState::Overdue
  } else if days_left
    <= i64::from(lead_days)
  {
    DueState::Soon
  } else {
    DueState::Later
  }
}

fn ordinal(day: u32) -> String {
  let suffix = if (11..=13)
    .contains(&(day % 100))
  {
    "th"
  } else {
    match day % 10 {
      | 1 => "st",
      | 2 => "nd",
      | 3 => "rd",
      | _ => "th"
    }
  };
  format!("{day}{suffix}")
}

/// "March 12th, 2025", with ", at 11:59
/// PM" when a time is present. Unparseable
/// input is returned unchanged.
pub fn format_deadline(
  raw: &str
) -> String {
  let Some((date, time)) = parse_due(raw)
  else {
    return raw.to_string();
  };

  let mut out = format!(
    "{} {}, {}",
    date.format("%B"),
    ordinal(chrono::Datelike::day(&date)),
    date.format("%Y")
  );
  if let Some(time) = time {
    out.push_str(&format!(
      ", at {}",
      time.format("%I:%M %p")
    ));
  }
  out
}
