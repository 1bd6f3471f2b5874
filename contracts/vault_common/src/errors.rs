use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring and off-chain handling.
/// @dev    Consumers should switch on this value first, then on the specific
///         `VaultError` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup errors (codes 1-99).
    Initialization,
    /// Caller permission errors (codes 100-199).
    Authorization,
    /// Collateral registry and bond purchase errors (codes 200-299).
    Bond,
    /// Claim and vesting-queue errors (codes 300-399).
    Vesting,
    /// Staking ledger, currency and lockup errors (codes 400-499).
    Staking,
    /// Argument and configuration validation errors (codes 500-599).
    Validation,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  VaultError
/// @notice Error enum shared by the bond market and the staking engine.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment;
///         append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Bond
///   300 - 399 : Vesting
///   400 - 499 : Staking
///   500 - 599 : Validation
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    NotAdmin = 100,

    /// Internal stake attempted by an address other than the configured bond market.
    NotBondMarket = 101,

    /// Price update attempted by an address that is neither admin nor price setter.
    NotPriceSetter = 102,

    // --- Bond (200-299) ---
    /// Collateral asset is not registered, or is registered but disabled.
    UnknownOrInactiveCollateral = 200,

    /// Collateral asset has already been registered.
    CollateralExists = 201,

    /// Discount must be strictly below 10_000 bps.
    InvalidDiscount = 202,

    /// Auto-stake requested before a staking contract was configured.
    StakingNotConfigured = 203,

    /// The staking contract rejected or failed the auto-stake credit.
    BridgeFailed = 204,

    // --- Vesting (300-399) ---
    /// Nothing is claimable, or the vesting entry id was never created.
    NothingToClaim = 300,

    /// Vesting entry unlock time has not been reached.
    StillVesting = 301,

    /// Vesting entry has already been paid out.
    AlreadyClaimed = 302,

    // --- Staking (400-499) ---
    /// Wager currency asset is already registered.
    CurrencyExists = 400,

    /// Wager currency asset is not registered.
    CurrencyNotFound = 401,

    /// Wager currency is registered but disabled.
    CurrencyInactive = 402,

    /// Lockup tier id has not been registered.
    LockupNotFound = 403,

    /// Unstake amount exceeds the unlocked or staked balance.
    InsufficientAvailable = 404,

    /// `set_price` asset and price vectors differ in length.
    PriceLengthMismatch = 405,

    /// Prices must be strictly positive.
    InvalidPrice = 406,

    /// Lockup tier duration must be strictly positive.
    InvalidLockup = 407,

    /// A price sample below the recorded count could not be read.
    PriceSampleMissing = 408,

    // --- Validation (500-599) ---
    /// Amount argument must be strictly positive.
    InvalidAmount = 500,

    /// Configuration value out of range.
    InvalidConfig = 501,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,

    /// Integer underflow detected during a checked arithmetic operation.
    Underflow = 701,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every VaultError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for VaultError {
    fn category(&self) -> ErrorCategory {
        match self {
            VaultError::NotInitialized | VaultError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            VaultError::NotAdmin | VaultError::NotBondMarket | VaultError::NotPriceSetter => {
                ErrorCategory::Authorization
            }

            VaultError::UnknownOrInactiveCollateral
            | VaultError::CollateralExists
            | VaultError::InvalidDiscount
            | VaultError::StakingNotConfigured
            | VaultError::BridgeFailed => ErrorCategory::Bond,

            VaultError::NothingToClaim | VaultError::StillVesting | VaultError::AlreadyClaimed => {
                ErrorCategory::Vesting
            }

            VaultError::CurrencyExists
            | VaultError::CurrencyNotFound
            | VaultError::CurrencyInactive
            | VaultError::LockupNotFound
            | VaultError::InsufficientAvailable
            | VaultError::PriceLengthMismatch
            | VaultError::InvalidPrice
            | VaultError::InvalidLockup
            | VaultError::PriceSampleMissing => ErrorCategory::Staking,

            VaultError::InvalidAmount | VaultError::InvalidConfig => ErrorCategory::Validation,

            VaultError::Overflow | VaultError::Underflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VaultError::NotInitialized => "Contract has not been initialized",
            VaultError::AlreadyInitialized => "Contract has already been initialized",
            VaultError::NotAdmin => "Caller is not the admin",
            VaultError::NotBondMarket => "Caller is not the configured bond market",
            VaultError::NotPriceSetter => "Caller is neither admin nor the price setter",
            VaultError::UnknownOrInactiveCollateral => {
                "Collateral is not registered or is disabled"
            }
            VaultError::CollateralExists => "Collateral asset is already registered",
            VaultError::InvalidDiscount => "Discount bps must be below 10000",
            VaultError::StakingNotConfigured => "No staking contract configured for auto-stake",
            VaultError::BridgeFailed => "Staking contract failed the auto-stake credit",
            VaultError::NothingToClaim => "Nothing to claim",
            VaultError::StillVesting => "Vesting entry is still locked",
            VaultError::AlreadyClaimed => "Vesting entry has already been claimed",
            VaultError::CurrencyExists => "Currency already exists",
            VaultError::CurrencyNotFound => "Currency is not registered",
            VaultError::CurrencyInactive => "Currency is disabled",
            VaultError::LockupNotFound => "Lockup tier is not registered",
            VaultError::InsufficientAvailable => {
                "Amount cannot be more than the stake available"
            }
            VaultError::PriceLengthMismatch => "Asset and price lists differ in length",
            VaultError::InvalidPrice => "Price must be strictly positive",
            VaultError::InvalidLockup => "Lockup duration must be strictly positive",
            VaultError::PriceSampleMissing => "Recorded price sample could not be read",
            VaultError::InvalidAmount => "Amount must be strictly positive (> 0)",
            VaultError::InvalidConfig => "Configuration value out of range",
            VaultError::Overflow => "Integer overflow in checked arithmetic",
            VaultError::Underflow => "Integer underflow in checked arithmetic",
        }
    }
}
