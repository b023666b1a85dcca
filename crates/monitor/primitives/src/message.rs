//! Decoded Bitswap protocol messages.

use crate::Cid;

/// What a want-list entry asks the remote peer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum WantType {
    /// The peer wants the block itself.
    #[default]
    Block = 0,
    /// The peer only wants to know whether the block is held.
    Have = 1,
}

/// A single want-list entry, passed through exactly as the capture layer
/// decoded it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WantlistEntry {
    pub cid: Cid,
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub want_type: WantType,
    /// Removes a previously sent want for `cid`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cancel: bool,
    /// Asks the remote to answer with `DontHave` if it lacks the block.
    #[cfg_attr(feature = "serde", serde(default))]
    pub send_dont_have: bool,
}

impl WantlistEntry {
    /// A plain block want with the given priority.
    pub fn new(cid: Cid, priority: i32) -> Self {
        Self {
            cid,
            priority,
            want_type: WantType::Block,
            cancel: false,
            send_dont_have: false,
        }
    }

    /// A cancel entry for `cid`.
    pub fn cancel(cid: Cid) -> Self {
        Self {
            cancel: true,
            ..Self::new(cid, 0)
        }
    }

    pub fn with_want_type(mut self, want_type: WantType) -> Self {
        self.want_type = want_type;
        self
    }

    pub fn with_send_dont_have(mut self, send_dont_have: bool) -> Self {
        self.send_dont_have = send_dont_have;
        self
    }
}

/// Presence or absence of a block at the sending peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum BlockPresenceType {
    Have = 0,
    DontHave = 1,
}

/// A block presence indicator carried by a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPresence {
    pub cid: Cid,
    #[cfg_attr(feature = "serde", serde(rename = "block_presence_type"))]
    pub presence: BlockPresenceType,
}

impl BlockPresence {
    pub fn have(cid: Cid) -> Self {
        Self {
            cid,
            presence: BlockPresenceType::Have,
        }
    }

    pub fn dont_have(cid: Cid) -> Self {
        Self {
            cid,
            presence: BlockPresenceType::DontHave,
        }
    }
}

/// Snapshot of one Bitswap message received from a remote peer.
///
/// `blocks` and `block_presences` are independent collections. Nothing here
/// checks them against each other or against the want-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BitswapMessage {
    /// Want-list entries in the order they appeared on the wire.
    pub wantlist_entries: Vec<WantlistEntry>,
    /// Whether the entries replace the peer's whole want-list.
    pub full_wantlist: bool,
    /// Blocks transferred with this message.
    pub blocks: Vec<Cid>,
    pub block_presences: Vec<BlockPresence>,
}

impl BitswapMessage {
    /// True if the message carries no entries, blocks or presences.
    pub fn is_empty(&self) -> bool {
        self.wantlist_entries.is_empty() && self.blocks.is_empty() && self.block_presences.is_empty()
    }

    /// Number of want-list entries that are cancels.
    pub fn cancel_count(&self) -> usize {
        self.wantlist_entries.iter().filter(|e| e.cancel).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(n: u8) -> Cid {
        Cid::from(vec![0x01, 0x55, n])
    }

    #[test]
    fn test_presence_type_repr() {
        assert_eq!(BlockPresenceType::from_repr(0), Some(BlockPresenceType::Have));
        assert_eq!(BlockPresenceType::from_repr(1), Some(BlockPresenceType::DontHave));
        assert_eq!(BlockPresenceType::from_repr(2), None);
        assert_eq!(BlockPresenceType::DontHave.to_string(), "dont_have");
    }

    #[test]
    fn test_wantlist_entry_builders() {
        let entry = WantlistEntry::new(cid(1), 10)
            .with_want_type(WantType::Have)
            .with_send_dont_have(true);
        assert_eq!(entry.priority, 10);
        assert_eq!(entry.want_type, WantType::Have);
        assert!(entry.send_dont_have);
        assert!(!entry.cancel);

        let cancel = WantlistEntry::cancel(cid(2));
        assert!(cancel.cancel);
        assert_eq!(cancel.want_type, WantType::Block);
    }

    #[test]
    fn test_message_collections_are_independent() {
        // A transferred block without a matching presence entry is valid.
        let message = BitswapMessage {
            wantlist_entries: vec![WantlistEntry::new(cid(1), 1), WantlistEntry::cancel(cid(2))],
            full_wantlist: false,
            blocks: vec![cid(3)],
            block_presences: vec![BlockPresence::dont_have(cid(4))],
        };
        assert!(!message.is_empty());
        assert_eq!(message.cancel_count(), 1);
        assert!(BitswapMessage::default().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_message_json_field_names() {
        let message = BitswapMessage {
            wantlist_entries: vec![],
            full_wantlist: true,
            blocks: vec![cid(7)],
            block_presences: vec![BlockPresence::have(cid(7))],
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["full_wantlist"], true);
        assert_eq!(json["blocks"][0], "015507");
        assert_eq!(json["block_presences"][0]["cid"], "015507");
        assert_eq!(json["block_presences"][0]["block_presence_type"], "have");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_entry_defaults_when_fields_missing() {
        let entry: WantlistEntry =
            serde_json::from_str(r#"{"cid":"015501","priority":3}"#).unwrap();
        assert_eq!(entry, WantlistEntry::new(cid(1), 3));
    }
}
