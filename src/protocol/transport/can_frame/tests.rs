//! Tests for frame construction and the `embedded_can::Frame` bridge.
use super::*;
use embedded_can::{Frame, Id, StandardId};

#[test]
/// A short payload is copied and the rest of the buffer stays zeroed.
fn test_data_frame() {
    let frame = CanFrame::data_frame(CanId::standard(0x42).unwrap(), &[1, 2, 3]).unwrap();
    assert_eq!(frame.len, 3);
    assert_eq!(frame.data, [1, 2, 3, 0, 0, 0, 0, 0]);
    assert_eq!(frame.kind, FrameKind::Data);
    assert_eq!(frame.format(), FrameFormat::Standard);
    assert_eq!(frame.payload(), &[1, 2, 3]);
}

#[test]
/// Nine bytes do not fit in a classic frame.
fn test_payload_too_long() {
    let result = CanFrame::data_frame(CanId::standard(1).unwrap(), &[0; 9]);
    assert_eq!(result, Err(FrameBuildError::PayloadTooLong { len: 9 }));
}

#[test]
/// Remote frames carry a DLC but no payload.
fn test_remote_frame() {
    let frame = CanFrame::remote_frame(CanId::standard(7).unwrap(), 4).unwrap();
    assert_eq!(frame.kind, FrameKind::Remote);
    assert_eq!(frame.dlc(), 4);
    assert!(frame.payload().is_empty());
    assert!(frame.is_remote_frame());

    assert_eq!(
        CanFrame::remote_frame(CanId::standard(7).unwrap(), 9),
        Err(FrameBuildError::InvalidDlc { dlc: 9 })
    );
}

#[test]
/// HAL-facing constructor goes through the same validation.
fn test_embedded_can_frame() {
    let id = StandardId::new(0x0C).unwrap();
    let frame = <CanFrame as Frame>::new(id, &[0xFF]).expect("one byte fits");
    assert!(frame.is_standard());
    assert!(frame.is_data_frame());
    assert_eq!(Frame::id(&frame), Id::Standard(id));
    assert_eq!(Frame::data(&frame), &[0xFF]);

    assert!(<CanFrame as Frame>::new(id, &[0; 12]).is_none());
}
