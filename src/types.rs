//! Response types returned by the staking wallet daemon.

use serde::{Deserialize, Serialize};

/// Wallet and node status, as reported by `getinfo`.
///
/// Fields the daemon omits are left at their zero value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub version: i64,
    #[serde(rename = "protocolversion")]
    pub protocol_version: u32,
    pub services: String,
    #[serde(rename = "walletversion")]
    pub wallet_version: i64,
    pub balance: f64,
    #[serde(rename = "staking status")]
    pub staking_status: String,
    pub blocks: u64,
    #[serde(rename = "timeoffset")]
    pub time_offset: i64,
    pub connections: u32,
    pub proxy: String,
    pub difficulty: f64,
    #[serde(alias = "testnest")]
    pub testnet: bool,
    #[serde(rename = "moneysupply")]
    pub money_supply: f64,
    #[serde(rename = "transparentsupply")]
    pub transparent_supply: f64,
    #[serde(rename = "shieldsupply")]
    pub shield_supply: f64,
    #[serde(rename = "keypoololdest")]
    pub keypool_oldest: u64,
    #[serde(rename = "keypoolsize")]
    pub keypool_size: u64,
    #[serde(rename = "paytxfee")]
    pub pay_tx_fee: f64,
    #[serde(rename = "relayfee")]
    pub relay_fee: f64,
    pub errors: String,
}

/// A wallet transaction, as reported by `gettransaction`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub txid: String,
    pub amount: f64,
    pub fee: f64,
    /// Negative when the transaction conflicts with one in the chain.
    pub confirmations: i64,
    #[serde(rename = "bcconfirmations")]
    pub bc_confirmations: u64,
    pub created: bool,
    #[serde(rename = "blockhash")]
    pub block_hash: String,
    #[serde(rename = "blockindex")]
    pub block_index: u32,
    #[serde(rename = "blocktime")]
    pub block_time: u64,
    #[serde(rename = "walletconflicts", alias = "walletconflics")]
    pub wallet_conflicts: Vec<WalletConflict>,
    pub time: u64,
    #[serde(rename = "timereceived")]
    pub time_received: u64,
    pub details: Vec<TransactionDetails>,
    pub hex: String,
}

/// One output of a wallet transaction touched by this wallet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionDetails {
    pub address: String,
    /// `send`, `receive`, `stake`, ...
    pub category: String,
    pub amount: f64,
    pub label: String,
    pub vout: u32,
    pub fee: f64,
}

/// A conflicting transaction reference.
///
/// Kept as the raw JSON entry: daemons list plain txids here, but the shape is not
/// pinned down.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletConflict(pub serde_json::Value);

impl WalletConflict {
    /// The conflicting txid, when the entry is a plain string.
    pub fn txid(&self) -> Option<&str> {
        self.0.as_str()
    }
}

/// Result of `validateaddress`.
///
/// Everything but `is_valid` is optional: `None` means the daemon did not report the
/// attribute, which is not the same as `Some(false)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidateAddress {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "scriptPubKey", skip_serializing_if = "Option::is_none")]
    pub script_pub_key: Option<String>,
    #[serde(rename = "ismine", skip_serializing_if = "Option::is_none")]
    pub is_mine: Option<bool>,
    #[serde(rename = "iswatchonly", skip_serializing_if = "Option::is_none")]
    pub is_watch_only: Option<bool>,
    #[serde(rename = "isscript", skip_serializing_if = "Option::is_none")]
    pub is_script: Option<bool>,
    #[serde(rename = "pubkey", skip_serializing_if = "Option::is_none")]
    pub pub_key: Option<String>,
    #[serde(rename = "iscompressed", skip_serializing_if = "Option::is_none")]
    pub is_compressed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_decodes_daemon_keys() {
        let value = json!({
            "version": 5020000,
            "protocolversion": 70923,
            "walletversion": 169900,
            "balance": 1250.5,
            "staking status": "Staking Active",
            "blocks": 3412345,
            "timeoffset": -1,
            "connections": 12,
            "difficulty": 123456.789,
            "testnet": false,
            "moneysupply": 75000000.0,
            "shieldsupply": 1000.25,
            "transparentsupply": 74999000.0,
            "keypoolsize": 1000,
            "paytxfee": 0.0,
            "relayfee": 0.0001,
            "errors": ""
        });
        let info: Info = serde_json::from_value(value).unwrap();

        assert_eq!(info.staking_status, "Staking Active");
        assert_eq!(info.blocks, 3412345);
        assert_eq!(info.time_offset, -1);
        assert_eq!(info.shield_supply, 1000.25);
        assert_eq!(info.keypool_oldest, 0);
        assert!(info.proxy.is_empty());
    }

    #[test]
    fn info_accepts_misspelled_testnet_key() {
        let value = json!({"testnest": true});
        let info: Info = serde_json::from_value(value).unwrap();
        assert!(info.testnet);
    }

    #[test]
    fn empty_object_decodes_to_default_info() {
        let info: Info = serde_json::from_value(json!({})).unwrap();
        assert_eq!(info, Info::default());
    }

    #[test]
    fn transaction_with_details_and_conflicts() {
        let value = json!({
            "amount": -10.0,
            "fee": -0.0001,
            "confirmations": 3,
            "bcconfirmations": 3,
            "blockhash": "00000000000000abcd",
            "blockindex": 1,
            "blocktime": 1700000000,
            "txid": "f00d",
            "walletconflicts": ["beef"],
            "time": 1700000000,
            "timereceived": 1700000001,
            "details": [{
                "address": "DAddr",
                "category": "send",
                "amount": -10.0,
                "vout": 1,
                "fee": -0.0001
            }],
            "hex": "0100"
        });
        let tx: Transaction = serde_json::from_value(value).unwrap();

        assert_eq!(tx.confirmations, 3);
        assert_eq!(tx.wallet_conflicts.len(), 1);
        assert_eq!(tx.wallet_conflicts[0].txid(), Some("beef"));
        assert_eq!(tx.details[0].category, "send");
        assert_eq!(tx.details[0].vout, 1);
        assert!(tx.details[0].label.is_empty());
    }

    #[test]
    fn transaction_conflict_objects_are_kept() {
        let value = json!({"walletconflics": [{"txid": "beef"}]});
        let tx: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(tx.wallet_conflicts[0].txid(), None);
        assert_eq!(tx.wallet_conflicts[0].0["txid"], "beef");
        assert!(tx.details.is_empty());
    }

    #[test]
    fn validate_address_keeps_absent_fields_absent() {
        let value = json!({"isvalid": true, "address": "X"});
        let v: ValidateAddress = serde_json::from_value(value).unwrap();

        assert!(v.is_valid);
        assert_eq!(v.address.as_deref(), Some("X"));
        assert_eq!(v.script_pub_key, None);
        assert_eq!(v.is_mine, None);
        assert_eq!(v.is_watch_only, None);
        assert_eq!(v.is_script, None);
        assert_eq!(v.pub_key, None);
        assert_eq!(v.is_compressed, None);
        assert_eq!(v.label, None);
    }

    #[test]
    fn validate_address_distinguishes_false_from_absent() {
        let value = json!({"isvalid": true, "ismine": false});
        let v: ValidateAddress = serde_json::from_value(value).unwrap();
        assert_eq!(v.is_mine, Some(false));
        assert_eq!(v.is_script, None);
    }

    #[test]
    fn validate_address_requires_isvalid() {
        let value = json!({"address": "X"});
        let res = serde_json::from_value::<ValidateAddress>(value);
        assert!(res.is_err());
    }
}
