//! Local registry of named wallets, the active network and the selected wallet.
//!
//! The registry is a single JSON document:
//!
//! ```json
//! { "wallets": [{ "name": "main.json", "path": "/abs/path/main.json" }],
//!   "network": "devnet",
//!   "selectedWallet": "main.json" }
//! ```
//!
//! Older files may list wallets as bare strings. Those are resolved to full
//! entries when the registry is loaded and written back in the structured form.
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::WalletHome;
use crate::error::{WalletError, WalletResult};
use crate::wallet::Network;

/// Every wallet name carries this suffix; `main` and `main.json` are the same wallet.
pub const WALLET_SUFFIX: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub name: String,
    pub path: PathBuf,
}

impl WalletEntry {
    /// True if `name` (already normalized) is this entry's name or its keyfile's name.
    fn matches(&self, name: &str) -> bool {
        self.name == name || self.path.file_name().and_then(|f| f.to_str()) == Some(name)
    }
}

/// Shapes a wallet may take inside the `wallets` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Entry { name: String, path: PathBuf },
    LegacyName(String),
}

impl StoredEntry {
    fn resolve(self, wallet_dir: &Path) -> WalletEntry {
        match self {
            StoredEntry::Entry { name, path } => WalletEntry {
                name: normalize_name(&name),
                path,
            },
            StoredEntry::LegacyName(raw) => {
                let as_path = PathBuf::from(&raw);
                if as_path.components().count() > 1 {
                    let name = normalize_name(
                        as_path
                            .file_name()
                            .and_then(|f| f.to_str())
                            .unwrap_or(raw.as_str()),
                    );
                    WalletEntry {
                        name,
                        path: as_path,
                    }
                } else {
                    let name = normalize_name(&raw);
                    WalletEntry {
                        path: wallet_dir.join(&name),
                        name,
                    }
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistryDocument<'a> {
    wallets: &'a [WalletEntry],
    network: Network,
    selected_wallet: Option<&'a str>,
}

/// Append the canonical suffix unless it is already present.
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.ends_with(WALLET_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{WALLET_SUFFIX}")
    }
}

pub(crate) fn validate_name(name: &str) -> WalletResult<()> {
    let stem = name.strip_suffix(WALLET_SUFFIX).unwrap_or(name);
    if stem.is_empty() || stem == "." || stem == ".." || name.contains(['/', '\\']) {
        return Err(WalletError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    wallets: Vec<WalletEntry>,
    network: Network,
    selected_wallet: Option<String>,
}

impl Registry {
    /// Load the registry from `home`, or start an empty one if the file is absent.
    ///
    /// A file that is not valid JSON is reported as `CorruptRegistry` rather than
    /// silently replaced, so a later save cannot wipe the user's wallet list.
    pub fn load(home: &WalletHome) -> WalletResult<Self> {
        let path = home.registry_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No registry at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(WalletError::io(
                    format!("Failed to read registry {}", path.display()),
                    e,
                ))
            }
        };

        let document: Value =
            serde_json::from_str(&contents).map_err(|e| WalletError::CorruptRegistry {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        let Value::Object(mut fields) = document else {
            return Err(WalletError::CorruptRegistry {
                path,
                reason: "expected a JSON object".to_string(),
            });
        };

        let wallet_dir = home.wallet_dir();
        let mut wallets: Vec<WalletEntry> = Vec::new();
        match fields.remove("wallets") {
            Some(Value::Array(items)) => {
                for item in items {
                    let entry = match serde_json::from_value::<StoredEntry>(item) {
                        Ok(stored) => stored.resolve(&wallet_dir),
                        Err(e) => {
                            warn!("Skipping unreadable registry entry: {e}");
                            continue;
                        }
                    };
                    if wallets.iter().any(|w| w.name == entry.name) {
                        warn!("Skipping duplicate registry entry '{}'", entry.name);
                        continue;
                    }
                    wallets.push(entry);
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => warn!("Registry 'wallets' is not a list, treating it as empty"),
        }

        let network = match fields.get("network").and_then(Value::as_str) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{e} Falling back to {}", Network::default());
                Network::default()
            }),
            None => Network::default(),
        };

        let selected_wallet = fields
            .get("selectedWallet")
            .and_then(Value::as_str)
            .map(normalize_name);

        debug!(
            "Loaded registry {} ({} wallets, network {network})",
            path.display(),
            wallets.len()
        );
        Ok(Self {
            wallets,
            network,
            selected_wallet,
        })
    }

    /// Overwrite the registry file with pretty-printed JSON.
    pub fn save(&self, home: &WalletHome) -> WalletResult<()> {
        let path = home.registry_path();
        fs::create_dir_all(home.root()).map_err(|e| {
            WalletError::io(format!("Failed to create {}", home.root().display()), e)
        })?;

        let document = RegistryDocument {
            wallets: &self.wallets,
            network: self.network,
            selected_wallet: self.selected_wallet.as_deref(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| WalletError::io("Failed to encode registry", e.into()))?;

        fs::write(&path, json)
            .map_err(|e| WalletError::io(format!("Failed to write {}", path.display()), e))?;

        debug!("Saved registry to {}", path.display());
        Ok(())
    }

    pub fn wallets(&self) -> &[WalletEntry] {
        &self.wallets
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_wallet.as_deref()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = normalize_name(name);
        self.wallets.iter().position(|w| w.matches(&name))
    }

    fn not_found(name: &str) -> WalletError {
        WalletError::NotFound(format!("wallet '{}'", normalize_name(name)))
    }

    /// Look a wallet up by name or keyfile name, with or without the suffix.
    pub fn find_wallet(&self, name: &str) -> Option<&WalletEntry> {
        self.position(name).map(|i| &self.wallets[i])
    }

    pub fn add_wallet(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> WalletResult<&WalletEntry> {
        let name = normalize_name(name);
        validate_name(&name)?;
        if self.find_wallet(&name).is_some() {
            return Err(WalletError::DuplicateName(name));
        }

        let index = self.wallets.len();
        self.wallets.push(WalletEntry {
            name,
            path: path.into(),
        });
        Ok(&self.wallets[index])
    }

    /// Rename a wallet and move its keyfile next to the old one.
    ///
    /// The registry is only changed once the file has been moved.
    pub fn rename_wallet(&mut self, current: &str, new: &str) -> WalletResult<&WalletEntry> {
        let index = self.position(current).ok_or_else(|| Self::not_found(current))?;
        let new_name = normalize_name(new);
        validate_name(&new_name)?;
        if matches!(self.position(&new_name), Some(other) if other != index) {
            return Err(WalletError::DuplicateName(new_name));
        }

        let was_selected = self
            .selected_wallet
            .as_deref()
            .is_some_and(|selected| self.wallets[index].matches(selected));
        let old_path = self.wallets[index].path.clone();
        let new_path = old_path.with_file_name(&new_name);
        if new_path != old_path {
            if new_path.exists() {
                return Err(WalletError::io(
                    format!("Cannot rename to {}", new_path.display()),
                    io::Error::new(ErrorKind::AlreadyExists, "destination already exists"),
                ));
            }
            fs::rename(&old_path, &new_path).map_err(|e| {
                WalletError::io(
                    format!(
                        "Failed to rename {} to {}",
                        old_path.display(),
                        new_path.display()
                    ),
                    e,
                )
            })?;
        }

        let entry = &mut self.wallets[index];
        let old_name = std::mem::replace(&mut entry.name, new_name);
        entry.path = new_path;
        if was_selected {
            self.selected_wallet = Some(entry.name.clone());
        }
        info!("Renamed wallet '{old_name}' to '{}'", entry.name);
        Ok(&self.wallets[index])
    }

    /// Delete a wallet's keyfile and drop it from the registry.
    ///
    /// A keyfile that is already gone is logged and ignored; any other
    /// filesystem error leaves the registry untouched.
    pub fn remove_wallet(&mut self, name: &str) -> WalletResult<WalletEntry> {
        let index = self.position(name).ok_or_else(|| Self::not_found(name))?;
        let path = &self.wallets[index].path;
        match fs::remove_file(path) {
            Ok(()) => info!("Deleted keyfile {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Keyfile {} was already missing", path.display());
            }
            Err(e) => {
                return Err(WalletError::io(
                    format!("Failed to delete {}", path.display()),
                    e,
                ))
            }
        }

        let entry = self.wallets.remove(index);
        if self
            .selected_wallet
            .as_deref()
            .is_some_and(|selected| entry.matches(selected))
        {
            self.selected_wallet = None;
        }
        Ok(entry)
    }

    pub fn select_wallet(&mut self, name: &str) -> WalletResult<&WalletEntry> {
        let index = self.position(name).ok_or_else(|| Self::not_found(name))?;
        self.selected_wallet = Some(self.wallets[index].name.clone());
        Ok(&self.wallets[index])
    }

    /// The selected wallet, or `None` if nothing is selected or the selection dangles.
    pub fn selected(&self) -> Option<&WalletEntry> {
        let name = self.selected_wallet.as_deref()?;
        let entry = self.find_wallet(name);
        if entry.is_none() {
            debug!("Selected wallet '{name}' is not in the registry");
        }
        entry
    }

    pub fn set_network(&mut self, network: &str) -> WalletResult<Network> {
        let network: Network = network.parse()?;
        self.network = network;
        Ok(network)
    }

    /// First `wallet-<n>.json` not used by the registry or by a file in `wallet_dir`.
    pub fn next_default_name(&self, wallet_dir: &Path) -> String {
        let mut index = 0u64;
        loop {
            let candidate = format!("wallet-{index}{WALLET_SUFFIX}");
            if self.find_wallet(&candidate).is_none() && !wallet_dir.join(&candidate).exists() {
                return candidate;
            }
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, "[]").unwrap();
    }

    #[test]
    fn normalize_appends_suffix_once() {
        assert_eq!(normalize_name("main"), "main.json");
        assert_eq!(normalize_name("main.json"), "main.json");
        assert_eq!(normalize_name("  main "), "main.json");
    }

    #[test]
    fn find_ignores_suffix() {
        let mut registry = Registry::default();
        registry.add_wallet("main", "/w/main.json").unwrap();

        for query in ["main", "main.json"] {
            let entry = registry.find_wallet(query).expect(query);
            assert_eq!(entry.path, PathBuf::from("/w/main.json"));
        }

        let mut registry = Registry::default();
        registry.add_wallet("savings.json", "/w/savings.json").unwrap();
        assert_eq!(registry.find_wallet("savings").unwrap().name, "savings.json");
    }

    #[test]
    fn find_matches_keyfile_name() {
        let mut registry = Registry::default();
        registry.add_wallet("alias", "/w/actual.json").unwrap();
        assert_eq!(registry.find_wallet("actual").unwrap().name, "alias.json");
        assert!(registry.find_wallet("missing").is_none());
    }

    #[test]
    fn duplicate_add_is_rejected_without_mutation() {
        let mut registry = Registry::default();
        registry.add_wallet("main", "/w/main.json").unwrap();
        let before = registry.clone();

        for name in ["main", "main.json"] {
            let err = registry.add_wallet(name, "/elsewhere/x.json").unwrap_err();
            assert!(matches!(err, WalletError::DuplicateName(ref n) if n == "main.json"));
        }
        assert_eq!(registry, before);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut registry = Registry::default();
        for name in ["", ".json", "../escape", "a/b", "a\\b", ".."] {
            let err = registry.add_wallet(name, "/w/x.json").unwrap_err();
            assert!(matches!(err, WalletError::InvalidName(_)), "{name}: {err:?}");
        }
        assert!(registry.wallets().is_empty());
    }

    #[test]
    fn remove_then_find_is_none_and_selection_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.json");
        touch(&path);

        let mut registry = Registry::default();
        registry.add_wallet("main", &path).unwrap();
        registry.select_wallet("main").unwrap();

        let removed = registry.remove_wallet("main.json").unwrap();
        assert_eq!(removed.path, path);
        assert!(!path.exists());
        assert!(registry.find_wallet("main").is_none());
        assert!(registry.selected().is_none());
        assert_eq!(registry.selected_name(), None);
    }

    #[test]
    fn remove_keeps_other_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::default();
        for name in ["a", "b"] {
            let path = dir.path().join(normalize_name(name));
            touch(&path);
            registry.add_wallet(name, path).unwrap();
        }
        registry.select_wallet("b").unwrap();

        registry.remove_wallet("a").unwrap();
        assert_eq!(registry.selected().unwrap().name, "b.json");
    }

    #[test]
    fn remove_tolerates_missing_keyfile() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::default();
        registry.add_wallet("ghost", dir.path().join("ghost.json")).unwrap();

        registry.remove_wallet("ghost").unwrap();
        assert!(registry.wallets().is_empty());
    }

    #[test]
    fn remove_unknown_is_not_found() {
        let mut registry = Registry::default();
        let err = registry.remove_wallet("nope").unwrap_err();
        assert!(matches!(err, WalletError::NotFound(_)));
    }

    #[test]
    fn rename_moves_keyfile_and_follows_selection() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.json");
        touch(&old);

        let mut registry = Registry::default();
        registry.add_wallet("a", &old).unwrap();
        registry.select_wallet("a").unwrap();

        let entry = registry.rename_wallet("a", "b").unwrap().clone();
        assert_eq!(entry.name, "b.json");
        assert_eq!(entry.path, dir.path().join("b.json"));
        assert!(!old.exists());
        assert!(entry.path.exists());
        assert!(registry.find_wallet("a").is_none());
        assert_eq!(registry.selected().unwrap().name, "b.json");
    }

    #[test]
    fn rename_follows_selection_recorded_by_keyfile_name() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        let actual = tmp.path().join("actual.json");
        touch(&actual);
        let document = serde_json::json!({
            "wallets": [{ "name": "alias", "path": actual }],
            "selectedWallet": "actual",
        });
        fs::write(home.registry_path(), document.to_string()).unwrap();

        let mut registry = Registry::load(&home).unwrap();
        assert_eq!(registry.selected().unwrap().name, "alias.json");

        registry.rename_wallet("alias", "renamed").unwrap();
        assert_eq!(registry.selected_name(), Some("renamed.json"));
        assert_eq!(registry.selected().unwrap().path, tmp.path().join("renamed.json"));
    }

    #[test]
    fn rename_unknown_is_not_found_and_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("other.json");
        touch(&other);
        let mut registry = Registry::default();
        registry.add_wallet("other", &other).unwrap();
        let before = registry.clone();

        let err = registry.rename_wallet("a", "b").unwrap_err();
        assert!(matches!(err, WalletError::NotFound(_)));
        assert_eq!(registry, before);
        assert!(other.exists());
        assert!(!dir.path().join("b.json").exists());
    }

    #[test]
    fn rename_onto_existing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        touch(&a);
        fs::write(&b, "untouched").unwrap();

        let mut registry = Registry::default();
        registry.add_wallet("a", &a).unwrap();

        let err = registry.rename_wallet("a", "b").unwrap_err();
        match err {
            WalletError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::AlreadyExists),
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(a.exists());
        assert_eq!(fs::read_to_string(&b).unwrap(), "untouched");
        assert_eq!(registry.find_wallet("a").unwrap().path, a);
    }

    #[test]
    fn rename_onto_registered_name_is_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::default();
        registry.add_wallet("a", dir.path().join("a.json")).unwrap();
        registry.add_wallet("b", "/other/place/b.json").unwrap();

        let err = registry.rename_wallet("a", "b").unwrap_err();
        assert!(matches!(err, WalletError::DuplicateName(_)));
    }

    #[test]
    fn select_requires_existing_wallet() {
        let mut registry = Registry::default();
        registry.add_wallet("main", "/w/main.json").unwrap();

        assert!(matches!(
            registry.select_wallet("other").unwrap_err(),
            WalletError::NotFound(_)
        ));
        assert!(registry.selected().is_none());

        registry.select_wallet("main").unwrap();
        assert_eq!(registry.selected_name(), Some("main.json"));
        assert_eq!(registry.selected().unwrap().path, PathBuf::from("/w/main.json"));
    }

    #[test]
    fn dangling_selection_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        fs::write(
            home.registry_path(),
            r#"{"wallets": [], "network": "devnet", "selectedWallet": "gone.json"}"#,
        )
        .unwrap();

        let registry = Registry::load(&home).unwrap();
        assert_eq!(registry.selected_name(), Some("gone.json"));
        assert!(registry.selected().is_none());
    }

    #[test]
    fn set_network_accepts_exactly_known_values() {
        let mut registry = Registry::default();
        for name in ["testnet", "mainnet", "devnet"] {
            assert_eq!(registry.set_network(name).unwrap().to_string(), name);
            assert_eq!(registry.network().to_string(), name);
        }

        registry.set_network("testnet").unwrap();
        for name in ["localnet", "MAINNET", "mainnet-beta", ""] {
            let err = registry.set_network(name).unwrap_err();
            assert!(matches!(err, WalletError::InvalidNetwork(_)));
            assert_eq!(registry.network(), Network::Testnet);
        }
    }

    #[test]
    fn default_names_take_first_unused_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::default();
        assert_eq!(registry.next_default_name(dir.path()), "wallet-0.json");

        registry.add_wallet("wallet-0", dir.path().join("wallet-0.json")).unwrap();
        assert_eq!(registry.next_default_name(dir.path()), "wallet-1.json");

        // A stray file on disk is skipped too.
        touch(&dir.path().join("wallet-1.json"));
        assert_eq!(registry.next_default_name(dir.path()), "wallet-2.json");
    }

    #[test]
    fn load_missing_file_gives_default() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = Registry::load(&WalletHome::new(tmp.path())).unwrap();
        assert_eq!(registry, Registry::default());
        assert_eq!(registry.network(), Network::Devnet);
        assert!(registry.wallets().is_empty());
        assert!(registry.selected_name().is_none());
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path().join("home"));

        let empty = Registry::default();
        empty.save(&home).unwrap();
        assert_eq!(Registry::load(&home).unwrap(), empty);

        let mut one = Registry::default();
        one.add_wallet("solo", "/w/solo.json").unwrap();
        one.save(&home).unwrap();
        assert_eq!(Registry::load(&home).unwrap(), one);

        let mut many = Registry::default();
        for i in 0..5 {
            many.add_wallet(&format!("w{i}"), format!("/w/w{i}.json")).unwrap();
        }
        many.select_wallet("w3").unwrap();
        many.set_network("mainnet").unwrap();
        many.save(&home).unwrap();
        assert_eq!(Registry::load(&home).unwrap(), many);
    }

    #[test]
    fn saved_document_uses_camel_case_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        let mut registry = Registry::default();
        registry.add_wallet("main", "/w/main.json").unwrap();
        registry.select_wallet("main").unwrap();
        registry.save(&home).unwrap();

        let raw: Value =
            serde_json::from_str(&fs::read_to_string(home.registry_path()).unwrap()).unwrap();
        assert_eq!(raw["selectedWallet"], "main.json");
        assert_eq!(raw["network"], "devnet");
        assert_eq!(raw["wallets"][0]["name"], "main.json");
        assert_eq!(raw["wallets"][0]["path"], "/w/main.json");
    }

    #[test]
    fn legacy_string_entries_are_resolved() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        fs::write(
            home.registry_path(),
            r#"{
                "wallets": ["old", "/keys/elsewhere.json", {"name": "new", "path": "/w/new.json"}],
                "network": "testnet",
                "selectedWallet": "old"
            }"#,
        )
        .unwrap();

        let registry = Registry::load(&home).unwrap();
        let names: Vec<&str> = registry.wallets().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["old.json", "elsewhere.json", "new.json"]);
        assert_eq!(registry.find_wallet("old").unwrap().path, home.wallet_dir().join("old.json"));
        assert_eq!(
            registry.find_wallet("elsewhere").unwrap().path,
            PathBuf::from("/keys/elsewhere.json")
        );
        assert_eq!(registry.network(), Network::Testnet);
        assert_eq!(registry.selected().unwrap().name, "old.json");

        // Written back in the structured form.
        registry.save(&home).unwrap();
        let raw: Value =
            serde_json::from_str(&fs::read_to_string(home.registry_path()).unwrap()).unwrap();
        assert_eq!(raw["wallets"][0]["name"], "old.json");
    }

    #[test]
    fn non_list_wallets_field_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        for body in [
            r#"{"network": "mainnet"}"#,
            r#"{"wallets": null, "network": "mainnet"}"#,
            r#"{"wallets": {"a": 1}, "network": "mainnet"}"#,
            r#"{"wallets": "main", "network": "mainnet"}"#,
        ] {
            fs::write(home.registry_path(), body).unwrap();
            let registry = Registry::load(&home).unwrap();
            assert!(registry.wallets().is_empty(), "{body}");
            assert_eq!(registry.network(), Network::Mainnet);
        }
    }

    #[test]
    fn unreadable_elements_and_duplicates_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        fs::write(
            home.registry_path(),
            r#"{"wallets": [42, {"name": "a"}, "a", "a.json"]}"#,
        )
        .unwrap();

        let registry = Registry::load(&home).unwrap();
        assert_eq!(registry.wallets().len(), 1);
        assert_eq!(registry.wallets()[0].name, "a.json");
    }

    #[test]
    fn unknown_network_falls_back_to_devnet() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        fs::write(home.registry_path(), r#"{"wallets": [], "network": "localnet"}"#).unwrap();
        assert_eq!(Registry::load(&home).unwrap().network(), Network::Devnet);
    }

    #[test]
    fn invalid_json_is_corrupt_registry() {
        let tmp = tempfile::tempdir().unwrap();
        let home = WalletHome::new(tmp.path());
        for body in ["{not json", "[1, 2, 3]"] {
            fs::write(home.registry_path(), body).unwrap();
            let err = Registry::load(&home).unwrap_err();
            assert!(matches!(err, WalletError::CorruptRegistry { .. }), "{body}: {err:?}");
        }
    }
}
