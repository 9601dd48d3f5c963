//! Access pattern behavior against real files and instrumented readers.

mod common;

use common::{sized_file, KIB, MIB};
use plotbench::bench::{grouped_scan, random_seeks, stride_seeks};
use plotbench::io::IoOp;
use plotbench::{
    AccessPattern, FileReader, MemoryReader, PatternError, RandomOffsets, Sampler,
    ScriptedOffsets,
};
use quanta::Clock;
use std::time::Duration;

#[test]
fn random_seeks_stay_within_file() {
    let file = sized_file(64 * KIB);
    let mut reader = FileReader::open(file.path()).unwrap();
    let mut offsets = RandomOffsets::from_seed(1);

    let samples = random_seeks(&mut reader, &mut offsets, &Sampler::new(), 200, 4 * KIB).unwrap();

    assert_eq!(samples.len(), 200);
    assert!(samples.iter().all(|s| s.bytes_read == 4 * KIB && !s.short_read));
}

#[test]
fn random_seek_offsets_leave_room_for_block() {
    let mut reader = MemoryReader::with_size(64 * KIB);
    let mut offsets = RandomOffsets::from_seed(7);

    random_seeks(&mut reader, &mut offsets, &Sampler::new(), 500, 4 * KIB).unwrap();

    let max_start = (64 * KIB - 4 * KIB) as u64;
    let seeks = reader.seek_offsets();
    assert_eq!(seeks.len(), 500);
    assert!(seeks.iter().all(|&offset| offset <= max_start));
}

#[test]
fn random_seeks_reject_block_larger_than_file() {
    let mut reader = MemoryReader::with_size(KIB);
    let mut offsets = ScriptedOffsets::default();

    let err = random_seeks(&mut reader, &mut offsets, &Sampler::new(), 4, 2 * KIB).unwrap_err();

    assert!(matches!(
        err,
        PatternError::Sizing {
            required: 2048,
            file_size: 1024,
            ..
        }
    ));
    assert!(reader.ops().is_empty());
}

#[test]
fn file_exactly_one_block_reads_from_start() {
    let file = sized_file(4 * KIB);
    let mut reader = FileReader::open(file.path()).unwrap();
    let mut offsets = RandomOffsets::from_seed(3);

    let samples = random_seeks(&mut reader, &mut offsets, &Sampler::new(), 8, 4 * KIB).unwrap();
    assert!(samples.iter().all(|s| s.bytes_read == 4 * KIB));

    let mut memory = MemoryReader::with_size(4 * KIB);
    random_seeks(&mut memory, &mut offsets, &Sampler::new(), 8, 4 * KIB).unwrap();
    assert!(memory.seek_offsets().iter().all(|&offset| offset == 0));
}

#[test]
fn grouped_scan_charges_seek_to_first_sample_only() {
    let (clock, mock) = Clock::mock();
    let seek = Duration::from_micros(500);
    let read = Duration::from_micros(20);
    let mut reader = MemoryReader::with_size(MIB).with_latency(mock, seek, read);
    let mut offsets = ScriptedOffsets::new(vec![8 * KIB as u64]);

    let samples =
        grouped_scan(&mut reader, &mut offsets, &Sampler::with_clock(clock), 4, 4 * KIB).unwrap();

    let nanos: Vec<u64> = samples.iter().map(|s| s.nanos).collect();
    assert_eq!(nanos, vec![520_000, 20_000, 20_000, 20_000]);
    assert_eq!(reader.seek_offsets(), vec![8 * KIB as u64]);
    assert_eq!(
        reader.ops().last(),
        Some(&IoOp::Read {
            offset: (8 * KIB + 3 * 4 * KIB) as u64,
            len: 4 * KIB
        })
    );
}

#[test]
fn grouped_scan_with_zero_plots_is_empty() {
    let mut reader = MemoryReader::with_size(KIB);
    let mut offsets = ScriptedOffsets::default();

    let samples = grouped_scan(&mut reader, &mut offsets, &Sampler::new(), 0, 512).unwrap();

    assert!(samples.is_empty());
    assert!(reader.ops().is_empty());
}

#[test]
fn stride_seeks_produce_one_sample_per_read() {
    let mut reader = MemoryReader::with_size(MIB);
    let mut offsets = ScriptedOffsets::new(vec![100]);

    let samples =
        stride_seeks(&mut reader, &mut offsets, &Sampler::new(), 7, 64 * KIB as u64, 4 * KIB)
            .unwrap();

    assert_eq!(samples.len(), 8);
    let expected: Vec<u64> = (0..8).map(|i| 100 + i * 64 * KIB as u64).collect();
    assert_eq!(reader.seek_offsets(), expected);
}

#[test]
fn stride_seeks_need_room_for_every_jump() {
    // 3 jumps of 1 KiB plus a 1 KiB block need 4 KiB
    let pattern = AccessPattern::StrideSeeks {
        jumps: 3,
        stride: KIB as u64,
        block_size: KIB,
    };
    assert_eq!(pattern.required_span(), Some(4 * KIB as u64));

    let mut exact = MemoryReader::with_size(4 * KIB);
    let samples = pattern
        .run(&mut exact, &mut ScriptedOffsets::default(), &Sampler::new())
        .unwrap();
    assert_eq!(samples.len(), 4);

    let mut short = MemoryReader::with_size(4 * KIB - 1);
    let err = pattern
        .run(&mut short, &mut ScriptedOffsets::default(), &Sampler::new())
        .unwrap_err();
    assert!(err.is_sizing());
}

#[test]
fn short_reads_are_flagged() {
    let mut reader = MemoryReader::with_size(64 * KIB).with_max_read(KIB);
    let mut offsets = ScriptedOffsets::default();

    let samples = random_seeks(&mut reader, &mut offsets, &Sampler::new(), 3, 4 * KIB).unwrap();

    assert!(samples.iter().all(|s| s.short_read && s.bytes_read == KIB));
}
