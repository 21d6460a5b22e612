//! Refresh sequencing.
//!
//! Every refresh of a view takes a token from its sequencer. When the
//! response comes back it is applied only if its token is still the latest
//! one issued, so a slow response can never overwrite a newer one.

/// Stamp carried by a refresh request and its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens for one view.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Whether `token` is the most recently issued one.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut seq = RequestSequencer::new();
        assert!(seq.latest().is_none());
        let a = seq.issue();
        assert!(seq.is_current(a));
        let b = seq.issue();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
        assert!(b > a);
    }

    proptest! {
        #[test]
        fn tokens_strictly_increase(n in 1usize..200) {
            let mut seq = RequestSequencer::new();
            let tokens: Vec<_> = (0..n).map(|_| seq.issue()).collect();
            prop_assert!(tokens.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(seq.latest(), tokens.last().copied());
        }
    }
}
