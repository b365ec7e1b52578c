// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

/// Status code carried by a response message.
///
/// This is the API's own outcome indicator and is unrelated to the HTTP
/// status of the transport. Formatting with `{}` yields the description
/// associated with the code; unknown codes get a generic description.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResponseStatus(u32);

/// Broad family a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Success,
    FeatureDisabled,
    Parameter,
    Retrieval,
    Authentication,
    ItemState,
    Authorization,
    UnknownApi,
    SearchEngine,
    Backend,
    Unknown,
}

impl ResponseStatus {
    pub const SUCCESS: u32 = 200;

    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// The status of a message that carries no `error` object.
    pub fn success() -> Self {
        Self(Self::SUCCESS)
    }

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == Self::SUCCESS
    }

    /// Description from the status table, if the code is a known one.
    pub fn description(self) -> Option<&'static str> {
        let description = match self.0 {
            200 => "The request was successful",
            402 => "User not enabled to use this function",
            10010 => "Missing parameter",
            10020 => "Invalid parameter",
            10040 => "Too many parameters as primary key",
            10050 => "Too many mutual exclusive parameters",
            10810 => "Error while retrieving item data",
            11000 => "Authentication Failure",
            13000 => "Item not found",
            13010 => "Item already exists",
            13020 => "User already unsubscribed",
            13040 => "Dependency item missing",
            13110 => "Item not owned by the user associated to the UAT",
            14010 => "Authorization failed",
            14011 => {
                "Missing user authentication token or authentication token not valid (possibly expired)"
            }
            14030 => "Permission denied",
            14031 => "Invalid or missing apikey",
            14032 => "Blacklisted apikey",
            14033 => "Unauthorized call",
            14034 => "Temporarily blocked",
            14040 => "API not found",
            16000 => "Search engine error",
            20000 => "DB error",
            20010 => "User already exists",
            21000 => "Unable to assign credits",
            _ => return None,
        };
        Some(description)
    }

    pub fn is_known(self) -> bool {
        self.description().is_some()
    }

    pub fn category(self) -> StatusCategory {
        if !self.is_known() {
            return StatusCategory::Unknown;
        }
        match self.0 {
            200 => StatusCategory::Success,
            402 => StatusCategory::FeatureDisabled,
            10010..=10050 => StatusCategory::Parameter,
            10810 => StatusCategory::Retrieval,
            11000 => StatusCategory::Authentication,
            13000..=13110 => StatusCategory::ItemState,
            14010..=14034 => StatusCategory::Authorization,
            14040 => StatusCategory::UnknownApi,
            16000 => StatusCategory::SearchEngine,
            20000..=21000 => StatusCategory::Backend,
            _ => StatusCategory::Unknown,
        }
    }
}

impl Default for ResponseStatus {
    fn default() -> Self {
        Self::success()
    }
}

impl From<u32> for ResponseStatus {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => f.write_str(description),
            None => write!(f, "Unknown status code {}!", self.0),
        }
    }
}

impl fmt::Debug for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResponseStatus({})", self.0)
    }
}
