/// Track state enumeration for the track lifecycle.
///
/// `Retired` tracks are dropped at the end of the frame; every other state
/// is kept until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Created from an unmatched detection this frame
    #[default]
    New,
    /// Matched to a detection this frame
    Active,
    /// Unmatched, still within the grace period
    Stale,
    /// Aged out; about to be dropped from the track table
    Retired,
}
