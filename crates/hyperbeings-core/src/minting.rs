//! Minter trait and stub implementation.
//!
//! After a being is created through [`Society::spawn_agent`], the society
//! asks a [`Minter`] to mint it as a token. The trait abstracts the mechanism
//! -- it could be a blockchain contract client, a mock, or the
//! [`StubMinter`] used for local runs. A failed mint never undoes the
//! creation of the being.
//!
//! [`Society::spawn_agent`]: crate::society::Society::spawn_agent

use chrono::Utc;
use hyperbeings_types::{EconomicStyle, MintReceipt, Traits};
use uuid::Uuid;

/// Errors a minter can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MintError {
    /// The minting backend could not be reached.
    #[error("minting backend unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// The minting backend refused the request.
    #[error("mint rejected: {reason}")]
    Rejected {
        /// Description of the rejection.
        reason: String,
    },
}

/// Everything the minting contract records about a being.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Display name of the being.
    pub name: String,
    /// The being's traits.
    pub traits: Traits,
    /// The being's economic style.
    pub economic_style: EconomicStyle,
}

/// A backend that mints beings as tokens.
pub trait Minter: Send {
    /// Mint one being.
    ///
    /// # Errors
    ///
    /// Returns [`MintError`] if the backend fails or refuses the mint.
    fn mint(&mut self, request: &MintRequest) -> Result<MintReceipt, MintError>;
}

/// A local minter that hands out sequential token ids.
#[derive(Debug, Clone, Default)]
pub struct StubMinter {
    minted: u64,
}

impl StubMinter {
    /// Create a new stub minter. The first token id is 1.
    pub const fn new() -> Self {
        Self { minted: 0 }
    }

    /// Number of tokens minted so far.
    pub const fn minted(&self) -> u64 {
        self.minted
    }
}

impl Minter for StubMinter {
    fn mint(&mut self, request: &MintRequest) -> Result<MintReceipt, MintError> {
        self.minted = self.minted.saturating_add(1);
        tracing::debug!(
            name = %request.name,
            style = %request.economic_style,
            token_id = self.minted,
            "Stub mint"
        );
        Ok(MintReceipt {
            token_id: self.minted,
            transaction_hash: format!("0x{}", Uuid::new_v4().simple()),
            minted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MintRequest {
        MintRequest {
            name: "Alice".to_owned(),
            traits: Traits {
                creativity: 85,
                socialness: 90,
                risk_taking: 45,
                ambition: 80,
                empathy: 75,
            },
            economic_style: EconomicStyle::Creator,
        }
    }

    #[test]
    fn stub_minter_issues_sequential_tokens() {
        let mut minter = StubMinter::new();
        let first = minter.mint(&request());
        let second = minter.mint(&request());
        assert_eq!(first.map(|r| r.token_id), Ok(1));
        assert_eq!(second.as_ref().map(|r| r.token_id), Ok(2));
        assert!(second.is_ok_and(|r| r.transaction_hash.starts_with("0x")));
        assert_eq!(minter.minted(), 2);
    }

    #[test]
    fn mint_error_messages() {
        let err = MintError::Unavailable {
            reason: "no wallet connected".to_owned(),
        };
        assert_eq!(err.to_string(), "minting backend unavailable: no wallet connected");
    }
}
