//! # Name Registry Service
//!
//! Owns the ledger, the escrow balance and the audit log, and implements
//! [`NameRegistryApi`] on top of a [`FundsLedger`].
//!
//! ## Atomicity
//!
//! Every operation runs all of its checks first, then the one fallible
//! external transfer, then the infallible internal mutations (record,
//! escrow, event). A failure at any point leaves no trace in the ledger,
//! the escrow or the log.
//!
//! ## Escrow
//!
//! `withdraw_all_funds` sweeps the whole escrow regardless of outstanding
//! deposits. A later refund that escrow cannot cover fails with
//! `InsufficientFunds`; [`NameRegistryService::escrow_shortfall`] exposes the gap.

use crate::config::{ConfigError, RegistryConfig};
use crate::domain::{
    check_all_invariants, fast_path, hierarchy, name, AccessController, Address, Amount,
    CanonicalName, DomainRecord, EventEntry, EventLog, InvariantCheckResult, Ledger, Operation,
    Pricing, RegistryError,
};
use crate::ports::inbound::NameRegistryApi;
use crate::ports::outbound::FundsLedger;

use tracing::{debug, info, instrument, warn};

/// Counters for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Successful claims through the standard path.
    pub registrations: u64,
    /// Successful claims through the fast path.
    pub fast_path_registrations: u64,
    /// Presets created by the administrator.
    pub presets_created: u64,
    /// Records removed (owner release or preset deletion).
    pub removals: u64,
    /// Escrow sweeps.
    pub withdrawals: u64,
    /// Rejected state-changing calls.
    pub rejections: u64,
}

/// Registration route, used in logs and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterPath {
    Standard,
    Fast,
}

impl RegisterPath {
    fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Fast => "fast",
        }
    }
}

/// The name registry.
pub struct NameRegistryService<F: FundsLedger> {
    config: RegistryConfig,
    ledger: Ledger,
    event_log: EventLog,
    access: AccessController,
    pricing: Pricing,
    funds: F,
    escrow_balance: Amount,
    stats: ServiceStats,
}

impl<F: FundsLedger> NameRegistryService<F> {
    /// Create a registry over `funds`.
    pub fn new(config: RegistryConfig, funds: F) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            administrator = %config.administrator,
            collateral = %config.default_collateral,
            fast_path = config.fast_path_enabled,
            "Name registry created"
        );

        Ok(Self {
            access: AccessController::new(config.administrator),
            pricing: Pricing::new(config.default_collateral),
            config,
            ledger: Ledger::new(),
            event_log: EventLog::new(),
            funds,
            escrow_balance: Amount::zero(),
            stats: ServiceStats::default(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The funds ledger the escrow moves against.
    pub fn funds(&self) -> &F {
        &self.funds
    }

    /// Current counters.
    pub fn stats(&self) -> ServiceStats {
        self.stats.clone()
    }

    /// The audit log.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Funds currently held by the registry.
    pub fn escrow_balance(&self) -> Amount {
        self.escrow_balance
    }

    /// Sum of the deposits owed back to current owners.
    pub fn outstanding_deposits(&self) -> Amount {
        self.ledger.total_deposits()
    }

    /// How far escrow falls short of the outstanding deposits.
    pub fn escrow_shortfall(&self) -> Amount {
        self.outstanding_deposits()
            .saturating_sub(self.escrow_balance)
    }

    /// Deposit `name` would require now. Fails only on an invalid name.
    pub fn required_deposit(&self, name: &str) -> Result<Amount, RegistryError> {
        let canonical = name::validate(name)?;
        Ok(self.pricing.required_deposit(&self.ledger, canonical.as_str()))
    }

    /// Check every ledger invariant against the current state.
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.ledger, &self.event_log)
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    fn register_standard(
        &mut self,
        caller: Address,
        raw: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        let canonical = name::validate(raw)?;
        hierarchy::check_parent(&self.ledger, &canonical)?;

        if self
            .ledger
            .get(canonical.as_str())
            .is_some_and(DomainRecord::is_owned)
        {
            return Err(RegistryError::AlreadyRegistered {
                name: canonical.into_string(),
            });
        }

        let required = self.pricing.required_deposit(&self.ledger, canonical.as_str());
        if payment != required {
            return Err(RegistryError::DepositMismatch {
                required,
                provided: payment,
            });
        }

        self.commit_registration(caller, canonical, payment, required)
    }

    fn register_fast(
        &mut self,
        caller: Address,
        raw: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        let canonical = fast_path::canonicalize(raw)?;

        if let Some(parent) = canonical.parent() {
            if !self.ledger.contains(parent) {
                return Err(RegistryError::ParentNotRegistered {
                    parent: parent.to_string(),
                });
            }
        }

        // One lookup covers ownership and price.
        let required = match self.ledger.get(canonical.as_str()) {
            Some(record) if record.is_owned() => {
                return Err(RegistryError::AlreadyRegistered {
                    name: canonical.into_string(),
                })
            }
            Some(record) if !record.price.is_zero() => record.price,
            _ => self.pricing.collateral(),
        };
        if payment != required {
            return Err(RegistryError::DepositMismatch {
                required,
                provided: payment,
            });
        }

        self.commit_registration(caller, canonical, payment, required)
    }

    /// Moves `payment` into escrow and records the claim.
    fn commit_registration(
        &mut self,
        caller: Address,
        canonical: CanonicalName,
        payment: Amount,
        required: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        let escrow = self
            .escrow_balance
            .checked_add(payment)
            .ok_or_else(|| RegistryError::InvariantViolation("escrow balance overflow".into()))?;

        let price = self
            .ledger
            .get(canonical.as_str())
            .map_or(required, |preset| preset.price);
        let record = DomainRecord::claimed(canonical, caller, payment, price);

        self.funds.debit(&caller, payment)?;

        self.escrow_balance = escrow;
        self.ledger.upsert(record.clone());
        self.event_log.append(
            record.name.clone(),
            caller,
            payment,
            record.price,
            Operation::Register,
        );

        Ok(record)
    }

    fn register_via(
        &mut self,
        path: RegisterPath,
        caller: Address,
        raw: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        let result = if caller.is_zero() {
            Err(RegistryError::AccessDenied { caller })
        } else {
            match path {
                RegisterPath::Standard => self.register_standard(caller, raw, payment),
                RegisterPath::Fast => self.register_fast(caller, raw, payment),
            }
        };

        match result {
            Ok(record) => {
                match path {
                    RegisterPath::Standard => self.stats.registrations += 1,
                    RegisterPath::Fast => self.stats.fast_path_registrations += 1,
                }
                telemetry::registration(path.as_str());
                self.publish_gauges();

                info!(
                    name = %record.name,
                    owner = %caller,
                    deposit = %record.deposit,
                    path = path.as_str(),
                    "Domain registered"
                );
                Ok(record)
            }
            Err(err) => Err(self.reject("register", raw, err)),
        }
    }

    fn create_preset(
        &mut self,
        caller: Address,
        raw: &str,
        price: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        self.access.ensure_administrator(&caller)?;
        let canonical = name::validate(raw)?;
        hierarchy::check_parent(&self.ledger, &canonical)?;
        let preset = self.pricing.preset(&self.ledger, canonical, price)?;

        self.ledger.insert(preset.clone())?;
        self.event_log.append(
            preset.name.clone(),
            Address::ZERO,
            Amount::zero(),
            preset.price,
            Operation::Register,
        );
        Ok(preset)
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    fn remove_inner(&mut self, caller: Address, raw: &str) -> Result<Amount, RegistryError> {
        let key = name::normalize_for_lookup(raw);
        let record = self
            .ledger
            .get(&key)
            .ok_or_else(|| RegistryError::NotFound {
                name: raw.to_string(),
            })?;
        let canonical = record.name.clone();

        let refund = if record.is_owned_by(&caller) {
            let deposit = record.deposit;
            let remaining = self.escrow_balance.checked_sub(deposit).ok_or(
                RegistryError::InsufficientFunds {
                    required: deposit,
                    available: self.escrow_balance,
                },
            )?;

            self.funds.credit(&caller, deposit)?;
            self.escrow_balance = remaining;
            deposit
        } else if self.access.is_administrator(&caller) {
            if record.is_owned() {
                return Err(RegistryError::InvariantViolation(
                    "cannot delete an owned domain".into(),
                ));
            }
            Amount::zero()
        } else {
            return Err(RegistryError::AccessDenied { caller });
        };

        self.ledger.remove(&key);
        self.event_log.append(
            canonical.clone(),
            Address::ZERO,
            Amount::zero(),
            Amount::zero(),
            Operation::Remove,
        );

        info!(name = %canonical, caller = %caller, refund = %refund, "Domain removed");
        Ok(refund)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn reject(&mut self, operation: &'static str, raw: &str, err: RegistryError) -> RegistryError {
        self.stats.rejections += 1;
        telemetry::rejection(err.kind().as_str());
        warn!(
            operation,
            name = raw,
            error = err.kind().as_str(),
            "Operation rejected: {err}"
        );
        err
    }

    fn publish_gauges(&self) {
        telemetry::gauges(self.ledger.len(), self.escrow_balance);
    }
}

impl<F: FundsLedger> NameRegistryApi for NameRegistryService<F> {
    #[instrument(skip(self, caller, payment), fields(caller = %caller))]
    fn register_domain(
        &mut self,
        caller: Address,
        name: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        self.register_via(RegisterPath::Standard, caller, name, payment)
    }

    #[instrument(skip(self, caller, payment), fields(caller = %caller))]
    fn register_domain_fast(
        &mut self,
        caller: Address,
        name: &str,
        payment: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        let path = if self.config.fast_path_enabled {
            RegisterPath::Fast
        } else {
            RegisterPath::Standard
        };
        self.register_via(path, caller, name, payment)
    }

    #[instrument(skip(self, caller, price), fields(caller = %caller))]
    fn register_price_domain(
        &mut self,
        caller: Address,
        name: &str,
        price: Amount,
    ) -> Result<DomainRecord, RegistryError> {
        match self.create_preset(caller, name, price) {
            Ok(preset) => {
                self.stats.presets_created += 1;
                telemetry::registration("preset");
                self.publish_gauges();

                info!(name = %preset.name, price = %preset.price, "Preset created");
                Ok(preset)
            }
            Err(err) => Err(self.reject("register_price", name, err)),
        }
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    fn remove_domain(&mut self, caller: Address, name: &str) -> Result<Amount, RegistryError> {
        match self.remove_inner(caller, name) {
            Ok(refund) => {
                self.stats.removals += 1;
                let path = if refund.is_zero() { "administrator" } else { "owner" };
                telemetry::removal(path);
                self.publish_gauges();
                Ok(refund)
            }
            Err(err) => Err(self.reject("remove", name, err)),
        }
    }

    fn get_domain(&self, name: &str) -> Result<DomainRecord, RegistryError> {
        let key = name::normalize_for_lookup(name);
        debug!(name, key = %key, "Looking up domain");

        self.ledger
            .get(&key)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    fn get_all_domains(&self) -> Vec<DomainRecord> {
        self.ledger.iter().cloned().collect()
    }

    fn count_domains(&self) -> usize {
        self.ledger.len()
    }

    fn collateral(&self) -> Amount {
        self.pricing.collateral()
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    fn withdraw_all_funds(&mut self, caller: Address) -> Result<Amount, RegistryError> {
        let result = self.access.ensure_administrator(&caller).and_then(|()| {
            let amount = self.escrow_balance;
            self.funds.credit(&caller, amount)?;
            Ok(amount)
        });

        match result {
            Ok(amount) => {
                self.escrow_balance = Amount::zero();
                self.stats.withdrawals += 1;
                self.publish_gauges();

                info!(amount = %amount, "Escrow swept to administrator");
                let shortfall = self.escrow_shortfall();
                if !shortfall.is_zero() {
                    warn!(shortfall = %shortfall, "Outstanding deposits exceed escrow");
                }
                Ok(amount)
            }
            Err(err) => Err(self.reject("withdraw", "", err)),
        }
    }

    fn owner(&self) -> Address {
        self.access.administrator()
    }

    fn events(&self) -> &[EventEntry] {
        self.event_log.entries()
    }
}

// =============================================================================
// METRICS
// =============================================================================

#[cfg(feature = "metrics")]
mod telemetry {
    use crate::domain::Amount;
    use registry_telemetry::{DOMAINS, ESCROW_BALANCE, REGISTRATIONS, REJECTIONS, REMOVALS};

    pub(super) fn registration(path: &str) {
        REGISTRATIONS.with_label_values(&[path]).inc();
    }

    pub(super) fn removal(path: &str) {
        REMOVALS.with_label_values(&[path]).inc();
    }

    pub(super) fn rejection(kind: &str) {
        REJECTIONS.with_label_values(&[kind]).inc();
    }

    #[allow(clippy::cast_precision_loss)]
    pub(super) fn gauges(domains: usize, escrow: Amount) {
        DOMAINS.set(i64::try_from(domains).unwrap_or(i64::MAX));
        ESCROW_BALANCE.set(u128::try_from(escrow).map_or(f64::MAX, |v| v as f64));
    }
}

#[cfg(not(feature = "metrics"))]
mod telemetry {
    use crate::domain::Amount;

    pub(super) fn registration(_path: &str) {}

    pub(super) fn removal(_path: &str) {}

    pub(super) fn rejection(_kind: &str) {}

    pub(super) fn gauges(_domains: usize, _escrow: Amount) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryFunds;

    const ADMIN: Address = Address::new([0xad; 20]);
    const ALICE: Address = Address::new([0xa1; 20]);
    const BOB: Address = Address::new([0xb0; 20]);

    fn service() -> NameRegistryService<InMemoryFunds> {
        let funds = InMemoryFunds::with_balances([
            (ALICE, Amount::from(1_000_000u64)),
            (BOB, Amount::from(1_000_000u64)),
        ]);
        NameRegistryService::new(RegistryConfig::for_testing(), funds).unwrap()
    }

    fn collateral() -> Amount {
        RegistryConfig::for_testing().default_collateral
    }

    #[test]
    fn test_register_moves_funds_into_escrow() {
        let mut registry = service();
        let record = registry.register_domain(ALICE, "com", collateral()).unwrap();

        assert_eq!(record.owner, Some(ALICE));
        assert_eq!(record.price, collateral());
        assert_eq!(registry.escrow_balance(), collateral());
        assert_eq!(
            registry.funds().balance_of(&ALICE),
            Amount::from(1_000_000u64) - collateral()
        );
        assert_eq!(registry.stats().registrations, 1);
    }

    #[test]
    fn test_failed_debit_leaves_no_trace() {
        let mut registry =
            NameRegistryService::new(RegistryConfig::for_testing(), InMemoryFunds::new()).unwrap();

        let err = registry.register_domain(ALICE, "com", collateral()).unwrap_err();
        assert!(matches!(err, RegistryError::InsufficientFunds { .. }));
        assert_eq!(registry.count_domains(), 0);
        assert!(registry.events().is_empty());
        assert!(registry.escrow_balance().is_zero());
        assert_eq!(registry.stats().rejections, 1);
    }

    #[test]
    fn test_preset_claim_keeps_price_and_position() {
        let mut registry = service();
        registry.register_domain(ALICE, "com", collateral()).unwrap();
        registry.register_price_domain(ADMIN, "ua", Amount::from(42u64)).unwrap();
        registry.register_domain(BOB, "uk", collateral()).unwrap();

        let claimed = registry.register_domain(ALICE, "ua", Amount::from(42u64)).unwrap();
        assert_eq!(claimed.price, Amount::from(42u64));

        let names: Vec<_> = registry
            .get_all_domains()
            .into_iter()
            .map(|r| r.name.into_string())
            .collect();
        assert_eq!(names, vec!["com", "ua", "uk"]);
    }

    #[test]
    fn test_admin_cannot_delete_owned_domain() {
        let mut registry = service();
        registry.register_domain(ALICE, "com", collateral()).unwrap();

        let err = registry.remove_domain(ADMIN, "com").unwrap_err();
        assert!(matches!(err, RegistryError::InvariantViolation(_)));
        assert!(registry.get_domain("com").is_ok());
    }

    #[test]
    fn test_admin_owning_a_name_takes_the_owner_path() {
        let funds = InMemoryFunds::with_balances([(ADMIN, Amount::from(10_000u64))]);
        let mut registry = NameRegistryService::new(RegistryConfig::for_testing(), funds).unwrap();
        registry.register_domain(ADMIN, "com", collateral()).unwrap();

        assert_eq!(registry.remove_domain(ADMIN, "com").unwrap(), collateral());
        assert_eq!(registry.funds().balance_of(&ADMIN), Amount::from(10_000u64));
    }

    #[test]
    fn test_sweep_then_refund_fails_atomically() {
        let mut registry = service();
        registry.register_domain(ALICE, "com", collateral()).unwrap();

        assert_eq!(registry.withdraw_all_funds(ADMIN).unwrap(), collateral());
        assert_eq!(registry.escrow_shortfall(), collateral());

        let err = registry.remove_domain(ALICE, "com").unwrap_err();
        assert_eq!(
            err,
            RegistryError::InsufficientFunds {
                required: collateral(),
                available: Amount::zero(),
            }
        );
        assert!(registry.get_domain("com").is_ok());
        assert_eq!(registry.events().len(), 1);
    }

    #[test]
    fn test_withdraw_requires_administrator() {
        let mut registry = service();
        assert_eq!(
            registry.withdraw_all_funds(ALICE),
            Err(RegistryError::AccessDenied { caller: ALICE })
        );
        assert_eq!(registry.stats().withdrawals, 0);
    }

    #[test]
    fn test_fast_path_disabled_uses_standard_path() {
        let mut config = RegistryConfig::for_testing();
        config.fast_path_enabled = false;
        let funds = InMemoryFunds::with_balances([(ALICE, Amount::from(10_000u64))]);
        let mut registry = NameRegistryService::new(config, funds).unwrap();

        registry.register_domain_fast(ALICE, "com", collateral()).unwrap();
        let stats = registry.stats();
        assert_eq!(stats.registrations, 1);
        assert_eq!(stats.fast_path_registrations, 0);
    }

    #[test]
    fn test_invariants_hold_after_mixed_operations() {
        let mut registry = service();
        registry.register_domain(ALICE, "com", collateral()).unwrap();
        registry.register_price_domain(ADMIN, "ua", Amount::from(7u64)).unwrap();
        registry.register_domain_fast(BOB, "kos-data.com", collateral()).unwrap();
        registry.remove_domain(ADMIN, "ua").unwrap();
        registry.remove_domain(ALICE, "https://COM").unwrap();

        assert!(registry.check_invariants().is_valid());
        assert_eq!(registry.outstanding_deposits(), registry.escrow_balance());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = RegistryConfig::for_testing();
        config.default_collateral = Amount::zero();
        assert!(matches!(
            NameRegistryService::new(config, InMemoryFunds::new()),
            Err(ConfigError::ZeroCollateral)
        ));
    }
}
