/// What a bot still owes the session.
/// - `Idle`: nothing; the next step prompt is answered on the spot
/// - `AwaitingResponseDecisions`: visits are queued and await the respond step
/// - `Done`: the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponseDecisions,
    Done,
}
