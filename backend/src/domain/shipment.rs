//! Shipment data model.
//!
//! The shipment is a flat record keyed by a client-assigned tracking number.
//! The tracking number is immutable after creation; the remaining six fields
//! are mutable through partial updates (see [`crate::domain::reconcile`]).

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of a tracking number.
pub const TRACKING_NUMBER_MAX: usize = 50;
/// Maximum length of the status label.
pub const STATUS_MAX: usize = 50;
/// Maximum length of the origin and destination labels.
pub const LOCATION_MAX: usize = 100;

/// Validation errors returned by the shipment constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipmentValidationError {
    #[error("tracking number must not be empty")]
    EmptyTrackingNumber,
    #[error("tracking number must be at most {TRACKING_NUMBER_MAX} characters")]
    TrackingNumberTooLong,
    #[error("status must not be empty")]
    EmptyStatus,
    #[error("status must be at most {STATUS_MAX} characters")]
    StatusTooLong,
    #[error("origin must not be empty")]
    EmptyOrigin,
    #[error("origin must be at most {LOCATION_MAX} characters")]
    OriginTooLong,
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("destination must be at most {LOCATION_MAX} characters")]
    DestinationTooLong,
    #[error("weight must not be negative")]
    NegativeWeight,
}

/// Client-assigned unique shipment identifier.
///
/// ## Invariants
/// - non-empty once trimmed of whitespace;
/// - at most [`TRACKING_NUMBER_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Validate and construct a [`TrackingNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ShipmentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ShipmentValidationError::EmptyTrackingNumber);
        }
        if value.chars().count() > TRACKING_NUMBER_MAX {
            return Err(ShipmentValidationError::TrackingNumberTooLong);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for TrackingNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TrackingNumber> for String {
    fn from(value: TrackingNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrackingNumber {
    type Error = ShipmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn validate_status(status: &str) -> Result<(), ShipmentValidationError> {
    if status.trim().is_empty() {
        return Err(ShipmentValidationError::EmptyStatus);
    }
    if status.chars().count() > STATUS_MAX {
        return Err(ShipmentValidationError::StatusTooLong);
    }
    Ok(())
}

fn validate_origin(origin: &str) -> Result<(), ShipmentValidationError> {
    if origin.trim().is_empty() {
        return Err(ShipmentValidationError::EmptyOrigin);
    }
    if origin.chars().count() > LOCATION_MAX {
        return Err(ShipmentValidationError::OriginTooLong);
    }
    Ok(())
}

fn validate_destination(destination: &str) -> Result<(), ShipmentValidationError> {
    if destination.trim().is_empty() {
        return Err(ShipmentValidationError::EmptyDestination);
    }
    if destination.chars().count() > LOCATION_MAX {
        return Err(ShipmentValidationError::DestinationTooLong);
    }
    Ok(())
}

fn validate_weight(weight: Decimal) -> Result<(), ShipmentValidationError> {
    if weight.is_sign_negative() && !weight.is_zero() {
        return Err(ShipmentValidationError::NegativeWeight);
    }
    Ok(())
}

/// A tracked shipment.
///
/// ## Invariants
/// - `tracking_number` is unique across all shipments (enforced by the store)
///   and immutable after creation;
/// - `weight` is non-negative.
///
/// No ordering between `shipping_date` and `delivery_date` is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ShipmentDto", into = "ShipmentDto")]
pub struct Shipment {
    #[schema(value_type = String, example = "TN-1001")]
    tracking_number: TrackingNumber,
    #[schema(example = "In Transit")]
    status: String,
    #[schema(example = "Rotterdam")]
    origin: String,
    #[schema(example = "Oslo")]
    destination: String,
    #[schema(value_type = f64, example = 200.5)]
    weight: Decimal,
    shipping_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_date: Option<DateTime<Utc>>,
}

impl Shipment {
    /// Fallible constructor enforcing the field invariants.
    pub fn try_new(
        tracking_number: TrackingNumber,
        status: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        weight: Decimal,
        shipping_date: DateTime<Utc>,
        delivery_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ShipmentValidationError> {
        let status = status.into();
        let origin = origin.into();
        let destination = destination.into();
        validate_status(&status)?;
        validate_origin(&origin)?;
        validate_destination(&destination)?;
        validate_weight(weight)?;
        Ok(Self {
            tracking_number,
            status,
            origin,
            destination,
            weight,
            shipping_date,
            delivery_date,
        })
    }

    /// Client-assigned unique identifier.
    #[must_use]
    pub fn tracking_number(&self) -> &TrackingNumber {
        &self.tracking_number
    }

    /// Free-form status label, e.g. "In Transit".
    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Free-form origin location label.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    /// Free-form destination location label.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Shipment weight, non-negative.
    #[must_use]
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Timestamp the shipment was dispatched.
    #[must_use]
    pub fn shipping_date(&self) -> DateTime<Utc> {
        self.shipping_date
    }

    /// Timestamp the shipment was delivered, absent until delivery.
    #[must_use]
    pub fn delivery_date(&self) -> Option<DateTime<Utc>> {
        self.delivery_date
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub(crate) fn set_origin(&mut self, origin: String) {
        self.origin = origin;
    }

    pub(crate) fn set_destination(&mut self, destination: String) {
        self.destination = destination;
    }

    pub(crate) fn set_weight(&mut self, weight: Decimal) {
        self.weight = weight;
    }

    pub(crate) fn set_shipping_date(&mut self, shipping_date: DateTime<Utc>) {
        self.shipping_date = shipping_date;
    }

    pub(crate) fn set_delivery_date(&mut self, delivery_date: Option<DateTime<Utc>>) {
        self.delivery_date = delivery_date;
    }
}

/// Requested update for the six mutable shipment fields.
///
/// The tracking number is deliberately absent: it is immutable and supplied
/// through the request path instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ShipmentPatchDto", into = "ShipmentPatchDto")]
pub struct ShipmentPatch {
    #[schema(example = "Delivered")]
    status: String,
    #[schema(example = "Rotterdam")]
    origin: String,
    #[schema(example = "Oslo")]
    destination: String,
    #[schema(value_type = f64, example = 200.5)]
    weight: Decimal,
    shipping_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_date: Option<DateTime<Utc>>,
}

impl ShipmentPatch {
    /// Fallible constructor enforcing the same field invariants as the entity.
    pub fn try_new(
        status: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        weight: Decimal,
        shipping_date: DateTime<Utc>,
        delivery_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ShipmentValidationError> {
        let status = status.into();
        let origin = origin.into();
        let destination = destination.into();
        validate_status(&status)?;
        validate_origin(&origin)?;
        validate_destination(&destination)?;
        validate_weight(weight)?;
        Ok(Self {
            status,
            origin,
            destination,
            weight,
            shipping_date,
            delivery_date,
        })
    }

    /// Build a patch carrying the mutable fields of an existing shipment.
    #[must_use]
    pub fn from_shipment(shipment: &Shipment) -> Self {
        Self {
            status: shipment.status().to_owned(),
            origin: shipment.origin().to_owned(),
            destination: shipment.destination().to_owned(),
            weight: shipment.weight(),
            shipping_date: shipment.shipping_date(),
            delivery_date: shipment.delivery_date(),
        }
    }

    /// Requested status label.
    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Requested origin label.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    /// Requested destination label.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Requested weight.
    #[must_use]
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Requested shipping timestamp.
    #[must_use]
    pub fn shipping_date(&self) -> DateTime<Utc> {
        self.shipping_date
    }

    /// Requested delivery timestamp, if any.
    #[must_use]
    pub fn delivery_date(&self) -> Option<DateTime<Utc>> {
        self.delivery_date
    }

    /// Override the requested status. Used by tests building patch variants.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Override the requested weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = weight;
        self
    }

    /// Override the requested delivery date.
    #[must_use]
    pub fn with_delivery_date(mut self, delivery_date: Option<DateTime<Utc>>) -> Self {
        self.delivery_date = delivery_date;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentDto {
    tracking_number: String,
    status: String,
    origin: String,
    destination: String,
    weight: Decimal,
    shipping_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_date: Option<DateTime<Utc>>,
}

impl From<Shipment> for ShipmentDto {
    fn from(value: Shipment) -> Self {
        Self {
            tracking_number: value.tracking_number.into(),
            status: value.status,
            origin: value.origin,
            destination: value.destination,
            weight: value.weight,
            shipping_date: value.shipping_date,
            delivery_date: value.delivery_date,
        }
    }
}

impl TryFrom<ShipmentDto> for Shipment {
    type Error = ShipmentValidationError;

    fn try_from(value: ShipmentDto) -> Result<Self, Self::Error> {
        Shipment::try_new(
            TrackingNumber::new(value.tracking_number)?,
            value.status,
            value.origin,
            value.destination,
            value.weight,
            value.shipping_date,
            value.delivery_date,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentPatchDto {
    status: String,
    origin: String,
    destination: String,
    weight: Decimal,
    shipping_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_date: Option<DateTime<Utc>>,
}

impl From<ShipmentPatch> for ShipmentPatchDto {
    fn from(value: ShipmentPatch) -> Self {
        Self {
            status: value.status,
            origin: value.origin,
            destination: value.destination,
            weight: value.weight,
            shipping_date: value.shipping_date,
            delivery_date: value.delivery_date,
        }
    }
}

impl TryFrom<ShipmentPatchDto> for ShipmentPatch {
    type Error = ShipmentValidationError;

    fn try_from(value: ShipmentPatchDto) -> Result<Self, Self::Error> {
        ShipmentPatch::try_new(
            value.status,
            value.origin,
            value.destination,
            value.weight,
            value.shipping_date,
            value.delivery_date,
        )
    }
}
