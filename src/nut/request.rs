/// A request line mapped onto the handful of upsd commands we answer.
///
/// The keyword is a case-insensitive *prefix* of the whole line and the
/// token count must match exactly, so `"verbose"` is still `VER` while
/// `"list  ups"` (two spaces) is not `LIST UPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `VER`
    Version,
    /// `LIST UPS`
    ListUps,
    /// `LIST VAR <ups>`, carrying the UPS name exactly as sent
    ListVar(&'a str),
    /// `LOGOUT`
    Logout,
    /// Anything else
    Unknown,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let lower = line.to_lowercase();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.len() {
            1 if lower.starts_with("ver") => Command::Version,
            2 if lower.starts_with("list ups") => Command::ListUps,
            3 if lower.starts_with("list var") => Command::ListVar(tokens[2]),
            1 if lower.starts_with("logout") => Command::Logout,
            _ => Command::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Version => "VER",
            Command::ListUps => "LIST UPS",
            Command::ListVar(_) => "LIST VAR",
            Command::Logout => "LOGOUT",
            Command::Unknown => "UNKNOWN",
        }
    }
}
