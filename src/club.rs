use serde::{Deserialize, Serialize};

/// The clubs that publish events. Users follow clubs to be notified about
/// their new events.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Club {
    Dtc,
    English,
    Books,
    Science,
    Literature,
}

pub struct ClubInfo {
    pub club: Club,
    pub description: String,
}

impl Club {
    pub fn all() -> [Club; 5] {
        [
            Club::Dtc,
            Club::English,
            Club::Books,
            Club::Science,
            Club::Literature,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Club::Dtc => "CLB Chuyển đổi số",
            Club::English => "CLB Tiếng Anh",
            Club::Books => "CLB Sách",
            Club::Science => "CLB KHTN",
            Club::Literature => "CLB Văn học",
        }
    }

    /// Display name with whitespace runs replaced by underscores.
    pub fn path_segment(&self) -> String {
        self.display_name()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl std::fmt::Display for Club {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl ClubInfo {
    pub fn club_list() -> [ClubInfo; 5] {
        [
            ClubInfo {
                club: Club::Dtc,
                description: "Digital transformation, AI and new technology".to_owned(),
            },
            ClubInfo {
                club: Club::English,
                description: "English speaking, debate and exchange activities".to_owned(),
            },
            ClubInfo {
                club: Club::Books,
                description: "Reading circles and book reviews".to_owned(),
            },
            ClubInfo {
                club: Club::Science,
                description: "Natural sciences experiments and competitions".to_owned(),
            },
            ClubInfo {
                club: Club::Literature,
                description: "Creative writing and literature discussions".to_owned(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_replaces_spaces() {
        assert_eq!(Club::Books.path_segment(), "CLB_Sách");
        assert_eq!(Club::Dtc.path_segment(), "CLB_Chuyển_đổi_số");
    }

    #[test]
    fn club_list_covers_every_club() {
        let listed: Vec<Club> = ClubInfo::club_list().iter().map(|c| c.club).collect();
        assert_eq!(listed, Club::all().to_vec());
    }
}
