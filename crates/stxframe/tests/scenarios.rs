use stxframe::{
    DecoderConfig, DecoderState, FrameDecoder, FrameFault, DEFAULT_CAPACITY, DLE, ETX, STX,
};

fn decode_chunks(chunks: &[&[u8]]) -> Vec<(usize, Vec<u8>)> {
    let mut decoder = FrameDecoder::with_context(
        Vec::new(),
        |calls: &mut Vec<(usize, Vec<u8>)>, len: usize, data: &[u8]| {
            calls.push((len, data.to_vec()));
        },
    );
    for chunk in chunks {
        decoder.feed(chunk);
    }
    decoder.finish().into_context()
}

fn payloads(chunks: &[&[u8]]) -> Vec<Vec<u8>> {
    decode_chunks(chunks)
        .into_iter()
        .map(|(len, data)| {
            assert_eq!(len, data.len());
            data
        })
        .collect()
}

#[test]
fn plain_payload() {
    assert_eq!(payloads(&[&[0x02, 0xFF, 0x03]]), vec![vec![0xFF]]);
}

#[test]
fn escaped_stx() {
    assert_eq!(payloads(&[&[0x02, 0x10, 0x22, 0x03]]), vec![vec![0x02]]);
}

#[test]
fn second_stx_abandons_first_frame() {
    assert_eq!(payloads(&[&[0x02, 0xFF, 0x02, 0xFE, 0x03]]), vec![vec![0xFE]]);
}

#[test]
fn consecutive_streams_each_deliver_their_frame() {
    assert_eq!(
        payloads(&[&[0x02, 0xFF, 0x10, 0x30, 0x03]]),
        vec![vec![0xFF, 0x10]]
    );
    assert_eq!(payloads(&[&[0x02, 0xFE, 0x03]]), vec![vec![0xFE]]);
}

#[test]
fn frame_spanning_two_feeds() {
    assert_eq!(
        payloads(&[&[0x02, 0xFF, 0x10], &[0x22, 0x03]]),
        vec![vec![0xFF, 0x02]]
    );
}

#[test]
fn noise_only_stream_delivers_nothing() {
    assert!(payloads(&[&[0xFF, 0x45, 0x10, 0x03, 0x65]]).is_empty());
}

#[test]
fn escape_split_on_every_boundary() {
    let wire: [u8; 8] = [0x02, 0x41, 0x10, 0x23, 0x10, 0x30, 0x42, 0x03];
    let whole = payloads(&[&wire]);
    assert_eq!(whole, vec![vec![0x41, 0x03, 0x10, 0x42]]);

    for split in 0..=wire.len() {
        let (head, tail) = wire.split_at(split);
        assert_eq!(payloads(&[head, tail]), whole, "split at {split}");
    }
}

#[test]
fn byte_at_a_time_matches_whole_feed() {
    let wire: [u8; 10] = [0x7E, 0x02, 0x10, 0x22, 0x02, 0x10, 0x23, 0x55, 0x03, 0x00];
    let chunks: Vec<&[u8]> = wire.chunks(1).collect();
    assert_eq!(payloads(&chunks), payloads(&[&wire]));
    assert_eq!(payloads(&[&wire]), vec![vec![0x03, 0x55]]);
}

#[test]
fn payload_at_capacity_faults_even_with_closing_marker() {
    let mut wire = vec![STX];
    wire.extend(std::iter::repeat(0x41).take(DEFAULT_CAPACITY));
    wire.push(ETX);
    assert!(payloads(&[&wire]).is_empty());

    let mut decoder = FrameDecoder::new(|_: &[u8]| {});
    decoder.feed(&wire);
    assert_eq!(
        decoder.fault(),
        Some(FrameFault::Overflow {
            capacity: DEFAULT_CAPACITY
        })
    );
    assert_eq!(decoder.len(), DEFAULT_CAPACITY);
}

#[test]
fn overflow_is_not_recovered_by_later_frames() {
    let mut wire = vec![STX];
    wire.extend(std::iter::repeat(0x41).take(DEFAULT_CAPACITY + 10));
    wire.extend_from_slice(&[ETX, STX, 0x01, ETX]);
    assert!(payloads(&[&wire]).is_empty());
}

#[test]
fn malformed_escape_delivers_nothing() {
    for bad in [0x00, 0x02, 0x03, 0x10, 0x21, 0x24, 0x31, 0xFF] {
        assert!(
            payloads(&[&[STX, 0x01, DLE, bad, ETX]]).is_empty(),
            "escape of 0x{bad:02x} should fault"
        );
    }
}

#[test]
fn escape_state_is_private_to_each_decoder() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut a = FrameDecoder::new(|p: &[u8]| first.extend_from_slice(p));
    let mut b = FrameDecoder::new(|p: &[u8]| second.extend_from_slice(p));

    a.feed(&[STX, 0xAA, DLE]);
    b.feed(&[STX, 0x22]);
    a.feed(&[0x23, ETX]);
    b.feed(&[ETX]);

    assert_eq!(a.state(), DecoderState::Closed);
    assert_eq!(b.state(), DecoderState::Closed);
    drop(a.finish());
    drop(b.finish());

    assert_eq!(first, vec![0xAA, 0x03]);
    assert_eq!(second, vec![0x22]);
}

#[test]
fn state_is_queryable_before_teardown() {
    let mut decoder =
        FrameDecoder::with_config(|_: &[u8]| {}, DecoderConfig::default().with_capacity(16));
    assert_eq!(decoder.capacity(), 16);
    assert!(!decoder.is_complete());

    decoder.feed(&[STX, 0x01]);
    assert!(decoder.is_frame_open());
    assert_eq!(decoder.packet(), None);

    decoder.feed(&[ETX]);
    assert!(decoder.is_complete());
    assert!(!decoder.is_invalid());
    assert_eq!(decoder.packet(), Some(&[0x01][..]));
}

#[test]
fn sink_can_be_inspected_and_replaced() {
    let mut decoder =
        FrameDecoder::with_context(0usize, |count: &mut usize, _: usize, _: &[u8]| *count += 1);
    *decoder.sink_mut().context_mut() = 10;
    decoder.feed(&[STX, 0x05, ETX]);
    assert_eq!(*decoder.sink().context(), 10);

    let sink = decoder.finish();
    assert_eq!(sink.into_context(), 11);
}
