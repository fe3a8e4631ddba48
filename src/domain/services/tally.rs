use std::collections::HashMap;

use crate::domain::models::{
    location::{CandidateWithVotes, LocationCandidate, LocationVote},
    participant::{AttendanceSummary, Participant, ParticipantStatus},
    restaurant::{Restaurant, RestaurantTally, RestaurantVote},
};

pub fn summarize_attendance(participants: &[Participant]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    for p in participants {
        match p.status.as_str() {
            s if s == ParticipantStatus::Going.as_str() => summary.going += 1,
            s if s == ParticipantStatus::NotGoing.as_str() => summary.not_going += 1,
            _ => summary.maybe += 1,
        }
    }
    summary
}

/// Candidates ordered by vote count (desc), ties kept in creation order.
pub fn tally_candidates(candidates: Vec<LocationCandidate>, votes: &[LocationVote]) -> Vec<CandidateWithVotes> {
    let mut voters: HashMap<&str, Vec<String>> = HashMap::new();
    for vote in votes {
        voters.entry(vote.candidate_id.as_str()).or_default().push(vote.voter_name.clone());
    }

    let mut tallied: Vec<CandidateWithVotes> = candidates
        .into_iter()
        .map(|candidate| {
            let names = voters.remove(candidate.id.as_str()).unwrap_or_default();
            CandidateWithVotes { vote_count: names.len(), voters: names, candidate }
        })
        .collect();

    tallied.sort_by(|a, b| {
        b.vote_count.cmp(&a.vote_count).then(a.candidate.created_at.cmp(&b.candidate.created_at))
    });
    tallied
}

pub fn tally_restaurants(restaurants: Vec<Restaurant>, votes: &[RestaurantVote]) -> Vec<RestaurantTally> {
    let mut voters: HashMap<&str, Vec<String>> = HashMap::new();
    for vote in votes {
        voters.entry(vote.restaurant_id.as_str()).or_default().push(vote.voter_name.clone());
    }

    let mut tallied: Vec<RestaurantTally> = restaurants
        .into_iter()
        .map(|restaurant| {
            let names = voters.remove(restaurant.id.as_str()).unwrap_or_default();
            RestaurantTally { vote_count: names.len(), voters: names, restaurant }
        })
        .collect();

    tallied.sort_by(|a, b| b.vote_count.cmp(&a.vote_count).then_with(|| a.restaurant.name.cmp(&b.restaurant.name)));
    tallied
}
