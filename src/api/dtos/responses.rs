use serde::Serialize;

use crate::domain::models::{
    event::Event,
    location::{CandidateWithVotes, LocationCandidate, LocationVote},
    participant::{AttendanceSummary, Participant},
    restaurant::{RestaurantTally, RestaurantVote},
};

#[derive(Serialize)]
pub struct EventCreatedResponse {
    pub event: Event,
    pub token: String,
    pub share_url: String,
    pub locations: Vec<LocationCandidate>,
}

#[derive(Serialize)]
pub struct EventDetailResponse {
    pub event: Event,
    pub participants: Vec<Participant>,
    pub summary: AttendanceSummary,
    pub locations: Vec<CandidateWithVotes>,
    pub restaurant_votes: Vec<RestaurantTally>,
}

#[derive(Serialize)]
pub struct RespondResponse {
    pub participant: Participant,
    pub created: bool,
}

#[derive(Serialize)]
pub struct LocationVoteResponse {
    pub vote: LocationVote,
    pub created: bool,
}

#[derive(Serialize)]
pub struct RestaurantVoteResponse {
    pub vote: RestaurantVote,
    pub created: bool,
}
