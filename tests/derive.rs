#[macro_use]
mod common;

use common::*;
use garmr_fit::avec::{self, FromMessage, FromMessages};

#[derive(Debug, Default, FromMessages)]
struct Document {
    #[message(0)]
    file_id: Option<Ident>,
    #[message(20)]
    samples: Vec<Sample>,
}

#[derive(Debug, Default, PartialEq, FromMessage)]
struct Ident {
    #[field(1)]
    manufacturer: Option<u16>,
    #[field(8, |name, c: u8| name.push(char::from(c)))]
    name: String,
}

#[derive(Debug, Default, PartialEq, FromMessage)]
struct Sample {
    #[field(253)]
    timestamp: Option<u32>,
    #[field(2)]
    altitude: Option<u32>,
    #[field(13)]
    temperature: Option<i16>,
    #[field(7, |total, w: u16| *total += u32::from(w))]
    total_power: u32,
    unrelated: Option<u8>,
}

#[test]
fn widens_narrower_encodings() {
    let data = FitBuilder::new()
        .definition(0, 20, &[(2, 2, UINT16), (13, 1, SINT8)])
        .data(0, &body![3000u16, -4i8])
        .definition(0, 20, &[(2, 4, UINT32)])
        .data(0, &body![100_000u32])
        .finish();

    let mut document = Document::default();
    avec::decode_slice(&data, &mut document).unwrap();

    assert_eq!(
        document.samples,
        [
            Sample {
                altitude: Some(3000),
                temperature: Some(-4),
                ..Default::default()
            },
            Sample {
                altitude: Some(100_000),
                ..Default::default()
            },
        ]
    );
}

#[test]
fn accumulates_arrays_with_handlers() {
    let data = FitBuilder::new()
        .definition(0, 0, &[(1, 2, UINT16), (8, 4, STRING)])
        .data(0, &[&body![1u16][..], b"Edge"].concat())
        .definition(1, 20, &[(7, 6, UINT16)])
        .data(1, &body![100u16, 0xFFFFu16, 250u16])
        .finish();

    let mut document = Document::default();
    avec::decode_slice(&data, &mut document).unwrap();

    assert_eq!(
        document.file_id,
        Some(Ident {
            manufacturer: Some(1),
            name: "Edge".to_owned(),
        })
    );
    assert_eq!(document.samples[0].total_power, 350);
}

#[test]
fn replaces_single_messages() {
    let data = FitBuilder::new()
        .definition(0, 0, &[(1, 2, UINT16)])
        .data(0, &body![1u16])
        .data(0, &body![32u16])
        .finish();

    let mut document = Document::default();
    avec::decode_slice(&data, &mut document).unwrap();

    assert_eq!(document.file_id.unwrap().manufacturer, Some(32));
}

#[test]
fn ignores_unknown_messages_and_fields() {
    let mut document = Document::default();
    assert!(document.add_message(49).is_none());

    let sample = document.add_message(20).unwrap();
    sample.add_u8(4, 90);
    sample.add_f32(2, 1.0);
    sample.add_u32(253, 7);

    assert_eq!(
        document.samples,
        [Sample {
            timestamp: Some(7),
            ..Default::default()
        }]
    );
}
