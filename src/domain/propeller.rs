// Propeller on/off state with per-propeller in-flight tracking
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropellerId {
    A,
    B,
    C,
    D,
}

impl PropellerId {
    pub const ALL: [PropellerId; 4] = [PropellerId::A, PropellerId::B, PropellerId::C, PropellerId::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropellerId::A => "A",
            PropellerId::B => "B",
            PropellerId::C => "C",
            PropellerId::D => "D",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PropellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropeller(pub String);

impl fmt::Display for UnknownPropeller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown propeller '{}'", self.0)
    }
}

impl FromStr for PropellerId {
    type Err = UnknownPropeller;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(PropellerId::A),
            "B" => Ok(PropellerId::B),
            "C" => Ok(PropellerId::C),
            "D" => Ok(PropellerId::D),
            _ => Err(UnknownPropeller(s.to_string())),
        }
    }
}

/// Pending single toggle: what to send and what to restore on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    pub prop: PropellerId,
    pub previous: bool,
    pub next: bool,
}

/// Pending bulk action: every propeller is in flight until it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingBulk {
    pub previous: [bool; 4],
    pub target: bool,
}

/// `{OFF, ON} x {idle, inflight}` for each propeller.
#[derive(Debug, Clone, Default)]
pub struct PropellerBoard {
    states: [bool; 4],
    inflight: [bool; 4],
}

impl PropellerBoard {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, prop: PropellerId) -> bool {
        self.states[prop.index()]
    }

    pub fn is_inflight(&self, prop: PropellerId) -> bool {
        self.inflight[prop.index()]
    }

    pub fn all_on(&self) -> bool {
        self.states.iter().all(|on| *on)
    }

    #[cfg(test)]
    pub fn states(&self) -> Vec<(PropellerId, bool)> {
        PropellerId::ALL.iter().map(|p| (*p, self.is_on(*p))).collect()
    }

    pub fn inflight(&self) -> Vec<PropellerId> {
        PropellerId::ALL.into_iter().filter(|p| self.is_inflight(*p)).collect()
    }

    /// Only idle propellers accept states from a status sync.
    pub fn apply_synced(&mut self, prop: PropellerId, on: bool) {
        if !self.is_inflight(prop) {
            self.states[prop.index()] = on;
        }
    }

    /// Flip the propeller optimistically and mark it in flight.
    /// `None` when a request for it is already outstanding.
    pub fn begin_toggle(&mut self, prop: PropellerId) -> Option<PendingToggle> {
        let i = prop.index();
        if self.inflight[i] {
            return None;
        }
        let previous = self.states[i];
        let next = !previous;
        self.states[i] = next;
        self.inflight[i] = true;
        Some(PendingToggle { prop, previous, next })
    }

    pub fn confirm_toggle(&mut self, pending: PendingToggle) {
        self.inflight[pending.prop.index()] = false;
    }

    pub fn revert_toggle(&mut self, pending: PendingToggle) {
        let i = pending.prop.index();
        self.states[i] = pending.previous;
        self.inflight[i] = false;
    }

    /// OFF when everything is ON, otherwise ON. `None` while anything is in flight.
    pub fn begin_bulk(&mut self) -> Option<PendingBulk> {
        if self.inflight.iter().any(|busy| *busy) {
            return None;
        }
        let previous = self.states;
        let target = !self.all_on();
        self.states = [target; 4];
        self.inflight = [true; 4];
        Some(PendingBulk { previous, target })
    }

    pub fn confirm_bulk(&mut self, _pending: PendingBulk) {
        self.inflight = [false; 4];
    }

    pub fn revert_bulk(&mut self, pending: PendingBulk) {
        self.states = pending.previous;
        self.inflight = [false; 4];
    }
}

/// Read propeller states from `{A: true, ...}` or `{propellers: {A: true, ...}}`.
/// Non-boolean entries are ignored.
pub fn states_from_status(payload: &Value) -> Vec<(PropellerId, bool)> {
    let source = match payload.get("propellers") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    };
    PropellerId::ALL
        .into_iter()
        .filter_map(|prop| source.get(prop.as_str())?.as_bool().map(|on| (prop, on)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_propeller_id() {
        assert_eq!("a".parse::<PropellerId>(), Ok(PropellerId::A));
        assert_eq!(" D ".parse::<PropellerId>(), Ok(PropellerId::D));
        assert!("E".parse::<PropellerId>().is_err());
    }

    #[test]
    fn test_toggle_suppressed_while_inflight() {
        let mut board = PropellerBoard::new();
        let pending = board.begin_toggle(PropellerId::A).unwrap();
        assert!(pending.next);
        assert!(board.is_on(PropellerId::A));
        assert!(board.begin_toggle(PropellerId::A).is_none());

        // other propellers are independent
        assert!(board.begin_toggle(PropellerId::B).is_some());

        board.confirm_toggle(pending);
        assert!(!board.is_inflight(PropellerId::A));
        assert!(board.is_on(PropellerId::A));
    }

    #[test]
    fn test_revert_restores_previous_state() {
        let mut board = PropellerBoard::new();
        let pending = board.begin_toggle(PropellerId::C).unwrap();
        board.revert_toggle(pending);
        assert!(!board.is_on(PropellerId::C));
        assert!(!board.is_inflight(PropellerId::C));
    }

    #[test]
    fn test_bulk_target_depends_on_all_on() {
        let mut board = PropellerBoard::new();
        let pending = board.begin_toggle(PropellerId::A).unwrap();
        board.confirm_toggle(pending);

        let bulk = board.begin_bulk().unwrap();
        assert!(bulk.target);
        board.confirm_bulk(bulk);
        assert!(board.all_on());

        let bulk = board.begin_bulk().unwrap();
        assert!(!bulk.target);
        board.revert_bulk(bulk);
        assert!(board.all_on());
    }

    #[test]
    fn test_bulk_blocks_single_toggles() {
        let mut board = PropellerBoard::new();
        let bulk = board.begin_bulk().unwrap();
        assert!(board.begin_toggle(PropellerId::B).is_none());
        assert!(board.begin_bulk().is_none());
        board.confirm_bulk(bulk);
        assert!(board.begin_toggle(PropellerId::B).is_some());
        assert!(board.begin_bulk().is_none());
    }

    #[test]
    fn test_states_from_status_shapes() {
        let flat = json!({ "A": true, "B": "yes", "D": false });
        assert_eq!(
            states_from_status(&flat),
            vec![(PropellerId::A, true), (PropellerId::D, false)]
        );

        let nested = json!({ "propellers": { "C": true } });
        assert_eq!(states_from_status(&nested), vec![(PropellerId::C, true)]);
    }
}
