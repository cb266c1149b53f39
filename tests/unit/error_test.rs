//! Tests for error types

use prometheus_parking_facility::core::{ErrorKind, ParkingError};

#[test]
fn test_lot_full_error() {
    let err = ParkingError::LotFull("LOT1".to_string());
    assert_eq!(format!("{err}"), "parking lot LOT1 is full");
    assert_eq!(err.kind(), ErrorKind::CapacityExhausted);
}

#[test]
fn test_no_lot_available_error() {
    let err = ParkingError::NoLotAvailable;
    assert_eq!(format!("{err}"), "no available parking spaces in any lot");
    assert_eq!(err.kind(), ErrorKind::CapacityExhausted);
}

#[test]
fn test_not_found_errors() {
    assert_eq!(
        format!("{}", ParkingError::CarNotFound("ABC".into())),
        "car ABC not found"
    );
    assert_eq!(
        format!("{}", ParkingError::NoActiveTicket("ABC".into())),
        "no active ticket found for ABC"
    );
    assert_eq!(ParkingError::AttendantNotFound("A9".into()).kind(), ErrorKind::NotFound);
    assert_eq!(ParkingError::LotNotFound("L9".into()).kind(), ErrorKind::NotFound);
}

#[test]
fn test_precondition_errors() {
    assert_eq!(format!("{}", ParkingError::EmptyPlate), "license plate cannot be empty");
    assert_eq!(ParkingError::EmptyPlate.kind(), ErrorKind::Precondition);
    assert_eq!(ParkingError::NilVehicle.kind(), ErrorKind::Precondition);
    assert_eq!(
        ParkingError::CarNotHandicapForHandicapStrategy("X".into()).kind(),
        ErrorKind::Precondition
    );
    assert_eq!(
        ParkingError::CarNotLargeForLargeStrategy("X".into()).kind(),
        ErrorKind::Precondition
    );
}

#[test]
fn test_error_into_anyhow() {
    let result: prometheus_parking_facility::core::AppResult<()> =
        Err(ParkingError::InvalidConfig("bad".into()).into());
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "invalid configuration: bad");
    assert!(err.downcast_ref::<ParkingError>().is_some());
}
