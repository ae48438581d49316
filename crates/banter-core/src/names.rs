//! Ephemeral display names
//!
//! Clients that do not configure a display name get a random one per
//! session, matching the throwaway-identity model of the rooms.

/// Names handed out to unconfigured clients
pub const NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Grace", "John", "Katherine",
    "Ken", "Leslie", "Linus", "Margaret", "Niklaus", "Radia", "Tim", "Tony",
];

/// Pick a random display name for this session
pub fn random_name() -> String {
    let idx = rand::random::<u64>() as usize % NAMES.len();
    NAMES[idx].to_string()
}
