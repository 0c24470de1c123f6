//! Vote choices and tallies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Good,
    Bad,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Good => "good",
            VoteChoice::Bad => "bad",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(VoteChoice::Good),
            "bad" => Ok(VoteChoice::Bad),
            other => Err(format!("unknown vote choice '{}'", other)),
        }
    }
}

/// Vote counts at a single consistent instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub good: u64,
    pub bad: u64,
}

impl Tally {
    pub fn new(good: u64, bad: u64) -> Self {
        Self { good, bad }
    }

    pub fn total(&self) -> u64 {
        self.good + self.bad
    }

    pub fn count(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::Good => self.good,
            VoteChoice::Bad => self.bad,
        }
    }

    /// Share of the total for `choice`, rounded half-up to a whole percent.
    /// Zero when nobody has voted yet.
    pub fn percentage(&self, choice: VoteChoice) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.count(choice) * 200 + total) / (total * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_choice_parse() {
        assert_eq!("good".parse::<VoteChoice>(), Ok(VoteChoice::Good));
        assert_eq!(" BAD ".parse::<VoteChoice>(), Ok(VoteChoice::Bad));
        assert!("maybe".parse::<VoteChoice>().is_err());
    }

    #[test]
    fn test_vote_choice_serde() {
        assert_eq!(serde_json::to_string(&VoteChoice::Good).unwrap(), "\"good\"");
        let choice: VoteChoice = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(choice, VoteChoice::Bad);
        assert!(serde_json::from_str::<VoteChoice>("\"abstain\"").is_err());
    }

    #[test]
    fn test_percentage_empty_tally() {
        let tally = Tally::default();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.percentage(VoteChoice::Good), 0);
        assert_eq!(tally.percentage(VoteChoice::Bad), 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 2/3 = 66.67% -> 67, 1/3 = 33.33% -> 33
        let tally = Tally::new(2, 1);
        assert_eq!(tally.percentage(VoteChoice::Good), 67);
        assert_eq!(tally.percentage(VoteChoice::Bad), 33);

        // 1/8 = 12.5% -> 13
        let tally = Tally::new(1, 7);
        assert_eq!(tally.percentage(VoteChoice::Good), 13);
        assert_eq!(tally.percentage(VoteChoice::Bad), 88);
    }
}
