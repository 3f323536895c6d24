//! Composable shipment search filter.
//!
//! A filter holds zero or more optional predicates combined with logical AND.
//! Each provided criterion is compiled into a predicate closure; the closure
//! list is folded over the record set. An absent criterion imposes no
//! constraint, so the empty filter matches everything.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::Shipment;

/// Optional search criteria for shipments.
///
/// Text criteria match exactly and case-sensitively; blank (whitespace-only)
/// values are treated as absent. Date criteria match by calendar date only,
/// ignoring the time of day. A delivery-date criterion excludes shipments
/// that have no delivery date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentFilter {
    weight: Option<Decimal>,
    shipping_date: Option<DateTime<Utc>>,
    delivery_date: Option<DateTime<Utc>>,
    origin: Option<String>,
    destination: Option<String>,
    status: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ShipmentFilter {
    /// A filter with no criteria; matches every shipment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Option<Decimal>) -> Self {
        self.weight = weight;
        self
    }

    /// Require the shipping date to fall on the given calendar date.
    #[must_use]
    pub fn with_shipping_date(mut self, shipping_date: Option<DateTime<Utc>>) -> Self {
        self.shipping_date = shipping_date;
        self
    }

    /// Require a present delivery date falling on the given calendar date.
    #[must_use]
    pub fn with_delivery_date(mut self, delivery_date: Option<DateTime<Utc>>) -> Self {
        self.delivery_date = delivery_date;
        self
    }

    /// Require an exact origin label. Blank values are treated as absent.
    #[must_use]
    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = normalize(origin);
        self
    }

    /// Require an exact destination label. Blank values are treated as absent.
    #[must_use]
    pub fn with_destination(mut self, destination: Option<String>) -> Self {
        self.destination = normalize(destination);
        self
    }

    /// Require an exact status label. Blank values are treated as absent.
    #[must_use]
    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = normalize(status);
        self
    }

    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Compile the provided criteria into one predicate closure per criterion.
    fn predicates(&self) -> Vec<Box<dyn Fn(&Shipment) -> bool + '_>> {
        let mut predicates: Vec<Box<dyn Fn(&Shipment) -> bool + '_>> = Vec::new();

        if let Some(weight) = self.weight {
            predicates.push(Box::new(move |s| s.weight() == weight));
        }
        if let Some(shipping_date) = self.shipping_date {
            let date = shipping_date.date_naive();
            predicates.push(Box::new(move |s| s.shipping_date().date_naive() == date));
        }
        if let Some(delivery_date) = self.delivery_date {
            let date = delivery_date.date_naive();
            predicates.push(Box::new(move |s| {
                s.delivery_date()
                    .is_some_and(|delivered| delivered.date_naive() == date)
            }));
        }
        if let Some(origin) = self.origin.as_deref() {
            predicates.push(Box::new(move |s| s.origin() == origin));
        }
        if let Some(destination) = self.destination.as_deref() {
            predicates.push(Box::new(move |s| s.destination() == destination));
        }
        if let Some(status) = self.status.as_deref() {
            predicates.push(Box::new(move |s| s.status() == status));
        }

        predicates
    }

    /// True when the shipment satisfies every provided criterion.
    #[must_use]
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.predicates().iter().all(|predicate| predicate(shipment))
    }

    /// Filter a record set, preserving the input order.
    #[must_use]
    pub fn apply(&self, shipments: Vec<Shipment>) -> Vec<Shipment> {
        let predicates = self.predicates();
        shipments
            .into_iter()
            .filter(|shipment| predicates.iter().all(|predicate| predicate(shipment)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::TrackingNumber;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn shipment(
        tracking_number: &str,
        status: &str,
        delivery_date: Option<DateTime<Utc>>,
    ) -> Shipment {
        Shipment::try_new(
            TrackingNumber::new(tracking_number).expect("valid tracking number"),
            status,
            "Rotterdam",
            "Oslo",
            Decimal::from(200),
            at(2024, 1, 1, 10),
            delivery_date,
        )
        .expect("valid shipment")
    }

    fn fleet() -> Vec<Shipment> {
        vec![
            shipment("1", "In Transit", None),
            shipment("2", "In Transit", None),
            shipment("3", "Delivered", Some(at(2024, 1, 5, 16))),
        ]
    }

    fn tracking_numbers(shipments: &[Shipment]) -> Vec<String> {
        shipments
            .iter()
            .map(|s| s.tracking_number().to_string())
            .collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ShipmentFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(fleet()).len(), 3);
    }

    #[test]
    fn status_filter_selects_matching_shipments() {
        let filter = ShipmentFilter::new().with_status(Some("In Transit".to_owned()));
        let found = filter.apply(fleet());
        assert_eq!(tracking_numbers(&found), vec!["1", "2"]);
    }

    #[test]
    fn status_match_is_case_sensitive() {
        let filter = ShipmentFilter::new().with_status(Some("in transit".to_owned()));
        assert!(filter.apply(fleet()).is_empty());
    }

    #[rstest]
    #[case(Some("   ".to_owned()))]
    #[case(Some(String::new()))]
    #[case(None)]
    fn blank_text_criteria_impose_no_constraint(#[case] status: Option<String>) {
        let filter = ShipmentFilter::new().with_status(status);
        assert!(filter.is_empty());
        assert_eq!(filter.apply(fleet()).len(), 3);
    }

    #[test]
    fn delivery_date_filter_excludes_undelivered_shipments() {
        let filter = ShipmentFilter::new().with_delivery_date(Some(at(2024, 1, 5, 0)));
        let found = filter.apply(fleet());
        assert_eq!(tracking_numbers(&found), vec!["3"]);
    }

    #[test]
    fn date_criteria_ignore_time_of_day() {
        let filter = ShipmentFilter::new().with_shipping_date(Some(at(2024, 1, 1, 23)));
        assert_eq!(filter.apply(fleet()).len(), 3);
    }

    #[test]
    fn criteria_combine_with_and_semantics() {
        let delivered_elsewhere = Shipment::try_new(
            TrackingNumber::new("4").expect("valid tracking number"),
            "Delivered",
            "Hamburg",
            "Oslo",
            Decimal::from(90),
            at(2024, 1, 1, 10),
            Some(at(2024, 1, 5, 9)),
        )
        .expect("valid shipment");
        let mut shipments = fleet();
        shipments.push(delivered_elsewhere);

        let filter = ShipmentFilter::new()
            .with_status(Some("Delivered".to_owned()))
            .with_origin(Some("Rotterdam".to_owned()));
        let found = filter.apply(shipments);
        assert_eq!(tracking_numbers(&found), vec!["3"]);
    }

    #[test]
    fn weight_filter_matches_exactly() {
        let filter = ShipmentFilter::new().with_weight(Some(Decimal::from(201)));
        assert!(filter.apply(fleet()).is_empty());

        let filter = ShipmentFilter::new().with_weight(Some(Decimal::from(200)));
        assert_eq!(filter.apply(fleet()).len(), 3);
    }
}
