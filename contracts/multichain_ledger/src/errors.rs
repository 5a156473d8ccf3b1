use soroban_sdk::contracttype;

/// Classification of ledger errors, used by off-chain consumers to decide
/// whether a failed call is worth correcting and resubmitting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Bad input the caller can fix (zero amount, unknown chain, ...).
    Validation = 1,
    /// The request is well formed but conflicts with current ledger state.
    StateConflict = 2,
    /// The token contract declined to move funds.
    External = 3,
    /// The caller lacks the role required by the entry point.
    Authorization = 4,
    /// Contract-wide conditions: lifecycle, pause, reentrancy, overflow.
    System = 5,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    UnknownChain = 4,
    UnsupportedChain = 5,
    InvalidAmount = 6,
    InvalidInput = 7,
    SameChain = 8,
    InsufficientStake = 9,
    InsufficientBalance = 10,
    InactiveSubscription = 11,
    PaymentNotDue = 12,
    SubscriptionNotFound = 13,
    TransferNotFound = 14,
    AlreadyCompleted = 15,
    WrongTargetChain = 16,
    DuplicateTransfer = 17,
    TransferFailed = 18,
    InsufficientPoolFunds = 19,
    SystemPaused = 20,
    Reentrant = 21,
    ArithmeticOverflow = 22,
    NoPendingOwner = 23,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::UnknownChain
            | ContractError::UnsupportedChain
            | ContractError::InvalidAmount
            | ContractError::InvalidInput
            | ContractError::SameChain => ErrorCategory::Validation,

            ContractError::InsufficientStake
            | ContractError::InsufficientBalance
            | ContractError::InactiveSubscription
            | ContractError::PaymentNotDue
            | ContractError::SubscriptionNotFound
            | ContractError::TransferNotFound
            | ContractError::AlreadyCompleted
            | ContractError::WrongTargetChain
            | ContractError::DuplicateTransfer
            | ContractError::NoPendingOwner => ErrorCategory::StateConflict,

            ContractError::TransferFailed | ContractError::InsufficientPoolFunds => {
                ErrorCategory::External
            }

            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::SystemPaused
            | ContractError::Reentrant
            | ContractError::ArithmeticOverflow => ErrorCategory::System,
        }
    }

    /// Whether resubmitting the same call later can succeed without the
    /// caller changing its arguments.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContractError::PaymentNotDue
                | ContractError::SystemPaused
                | ContractError::TransferFailed
                | ContractError::InsufficientPoolFunds
        )
    }
}
