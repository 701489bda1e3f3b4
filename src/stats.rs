use serde::{Deserialize, Serialize};

use crate::club::Club;
use crate::event::EventPost;

/// Site-wide counters shown on the home page and the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStats {
    pub visitors: u64,
    pub members: u64,
    pub events_count: u64,
    pub awards: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubShare {
    pub club: Club,
    pub name: &'static str,
    pub count: usize,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
}

/// Event counts per club, largest first. Every club is listed, including
/// those with no events; an empty event list yields an empty distribution.
pub fn club_distribution(posts: &[EventPost]) -> Vec<ClubShare> {
    let total = posts.len();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<ClubShare> = Club::all()
        .iter()
        .map(|club| {
            let count = posts.iter().filter(|p| &p.club == club).count();
            ClubShare {
                club: *club,
                name: club.display_name(),
                count,
                percent: ((count as f64 / total as f64) * 100.0).round() as u32,
            }
        })
        .collect();

    // Stable, so ties keep catalogue order.
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}
