use std::fmt;

/// Outcome of one execute call, as reported across the foreign-function boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// The execute transaction was handed to DDEML.
    Submitted = 0,
    /// The DDEML instance could not be created.
    InitializeFailed = 1,
    /// No server answered on the server/topic pair.
    ConnectFailed = 2,
    /// The command could not be wrapped in a data handle.
    PayloadFailed = 3,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Status::Submitted
    }

    pub fn description(self) -> &'static str {
        match self {
            Status::Submitted => "command submitted",
            Status::InitializeFailed => "DDE session initialization failed",
            Status::ConnectFailed => "could not connect to DDE server/topic",
            Status::PayloadFailed => "command payload could not be prepared",
        }
    }
}

impl TryFrom<i32> for Status {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Submitted),
            1 => Ok(Status::InitializeFailed),
            2 => Ok(Status::ConnectFailed),
            3 => Ok(Status::PayloadFailed),
            other => Err(other),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn codes_match_boundary_contract() {
        assert_eq!(Status::Submitted.code(), 0);
        assert_eq!(Status::InitializeFailed.code(), 1);
        assert_eq!(Status::ConnectFailed.code(), 2);
        assert_eq!(Status::PayloadFailed.code(), 3);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(Status::try_from(2), Ok(Status::ConnectFailed));
        assert_eq!(Status::try_from(4), Err(4));
        assert_eq!(Status::try_from(-1), Err(-1));
    }
}
