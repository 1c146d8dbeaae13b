//! Preconditions checked before any request leaves the process.

use url::Url;

use crate::{
    concepts::Operation,
    draft::TransactionDraft,
    errors::ValidationError,
    types::{Amount, PhoneNumber},
};

/// Draft fields that passed [`check_minimum_requirements`] for an operation.
///
/// Fields the operation does not require are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub amount: Option<Amount>,
    pub partner_id: Option<String>,
    pub phone: PhoneNumber,
    pub callback: Option<Url>,
}

/// Fields of an operation that moves money: merchant payment, cash-in, cash-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFields {
    pub amount: Amount,
    /// Always `Some` for operations that require a partner id.
    pub partner_id: Option<String>,
    pub phone: PhoneNumber,
    pub callback: Url,
}

/// Fields of a balance inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceFields {
    pub partner_id: String,
    pub phone: PhoneNumber,
}

impl From<TransferFields> for ValidatedFields {
    fn from(fields: TransferFields) -> Self {
        ValidatedFields {
            amount: Some(fields.amount),
            partner_id: fields.partner_id,
            phone: fields.phone,
            callback: Some(fields.callback),
        }
    }
}

impl From<BalanceFields> for ValidatedFields {
    fn from(fields: BalanceFields) -> Self {
        ValidatedFields {
            amount: None,
            partner_id: Some(fields.partner_id),
            phone: fields.phone,
            callback: None,
        }
    }
}

/// Check the draft against the rules of `operation`.
///
/// Rules are evaluated in a fixed order (amount, partner id, phone, callback)
/// and the first violation is returned.
pub fn check_minimum_requirements(
    draft: &TransactionDraft,
    operation: Operation,
) -> Result<ValidatedFields, ValidationError> {
    if operation.requires_amount() {
        check_transfer(draft, operation).map(ValidatedFields::from)
    } else {
        check_balance(draft).map(ValidatedFields::from)
    }
}

/// Rules of a money-moving `operation`: amount, partner id when required,
/// phone, callback.
pub fn check_transfer(
    draft: &TransactionDraft,
    operation: Operation,
) -> Result<TransferFields, ValidationError> {
    let amount = check_amount(draft.amount.as_deref())?;
    let partner_id = if operation.requires_partner_id() {
        Some(check_partner_id(draft.partner_id.as_deref())?)
    } else {
        draft.partner_id.clone()
    };
    let phone = check_phone(draft.phone.as_deref())?;
    let callback = check_callback(draft.callback.as_deref())?;

    Ok(TransferFields {
        amount,
        partner_id,
        phone,
        callback,
    })
}

/// Rules of a balance inquiry: partner id, phone.
pub fn check_balance(draft: &TransactionDraft) -> Result<BalanceFields, ValidationError> {
    let partner_id = check_partner_id(draft.partner_id.as_deref())?;
    let phone = check_phone(draft.phone.as_deref())?;
    Ok(BalanceFields { partner_id, phone })
}

fn check_partner_id(raw: Option<&str>) -> Result<String, ValidationError> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_owned()),
        _ => Err(ValidationError::MissingPartnerId),
    }
}

fn check_phone(raw: Option<&str>) -> Result<PhoneNumber, ValidationError> {
    raw.ok_or(ValidationError::InvalidPhone)?.parse()
}

fn check_amount(raw: Option<&str>) -> Result<Amount, ValidationError> {
    let amount: Amount = raw.ok_or(ValidationError::InvalidAmount)?.parse()?;
    if amount < Amount::MINIMUM {
        return Err(ValidationError::AmountTooLow {
            given: amount.value(),
            minimum: Amount::MINIMUM.value(),
        });
    }
    Ok(amount)
}

/// An absolute `http`/`https` URL with a host.
fn check_callback(raw: Option<&str>) -> Result<Url, ValidationError> {
    let url = raw
        .and_then(|raw| Url::parse(raw.trim()).ok())
        .ok_or(ValidationError::InvalidCallback)?;
    match (url.scheme(), url.host_str()) {
        ("http" | "https", Some(host)) if !host.is_empty() => Ok(url),
        _ => Err(ValidationError::InvalidCallback),
    }
}
