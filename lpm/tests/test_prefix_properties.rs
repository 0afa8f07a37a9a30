use lpm::{calculate_prefix_list, AddressRange, Prefix, PrefixError, PrefixIter};

/// Check that `prefixes` partitions exactly `[start, end)`
fn assert_exact_cover(start: u64, end: u64, prefixes: &[Prefix]) {
    let mut next = u128::from(start);

    for prefix in prefixes {
        assert_eq!(
            u128::from(prefix.base()),
            next,
            "gap or overlap at {prefix} for 0x{start:x}-0x{end:x}"
        );
        assert!(
            Prefix::new(prefix.base(), prefix.length()).is_some(),
            "{prefix} is not aligned to its own size"
        );
        next += prefix.size();
    }

    assert_eq!(next, u128::from(end), "prefixes of 0x{start:x}-0x{end:x} do not end at end");
}

/// Fewest aligned blocks that exactly cover `[start, end)`, by exhaustive search
fn optimal_block_count(start: u64, end: u64) -> usize {
    let len = usize::try_from(end - start).unwrap();
    let mut best = vec![usize::MAX; len + 1];
    best[len] = 0;

    for offset in (0..len).rev() {
        let cur = start + offset as u64;
        for bits in 0..64u32 {
            let size = 1u64 << bits;
            if cur % size != 0 || size > end - cur {
                break;
            }
            let rest = best[offset + size as usize];
            best[offset] = best[offset].min(rest + 1);
        }
    }

    best[0]
}

/// xorshift64, so sampled ranges are the same on every run
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

#[test]
fn test_small_ranges_are_exact_and_minimal() {
    for start in 0..=130u64 {
        for end in start..=130u64 {
            let prefixes = calculate_prefix_list(start, end).unwrap();
            assert_exact_cover(start, end, &prefixes);
            assert_eq!(
                prefixes.len(),
                optimal_block_count(start, end),
                "non-minimal decomposition of {start}-{end}"
            );
        }
    }
}

#[test]
fn test_lookup_resolves_only_inside_range() {
    let (start, end) = (0x55ff_3f68_a000u64, 0x55ff_3f74_0000u64);
    let prefixes = calculate_prefix_list(start, end).unwrap();

    let probes = [
        start - 1,
        start,
        start + 1,
        0x55ff_3f69_ffff,
        0x55ff_3f70_0000,
        end - 1,
        end,
        end + 0x1000,
    ];
    for addr in probes {
        let matches = prefixes.iter().filter(|p| p.contains(addr)).count();
        let expected = usize::from(AddressRange::new(start, end).contains(addr));
        assert_eq!(matches, expected, "address 0x{addr:x}");
    }
}

#[test]
fn test_sampled_large_ranges() {
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);

    for _ in 0..2000 {
        let a = rng.next();
        let b = rng.next();
        let (start, end) = (a.min(b), a.max(b));
        let prefixes = calculate_prefix_list(start, end).unwrap();
        assert_exact_cover(start, end, &prefixes);
        assert!(prefixes.len() <= 128);
        assert!(prefixes.windows(2).all(|w| w[0].base() < w[1].base()));
    }
}

#[test]
fn test_page_aligned_mappings() {
    let mut rng = Rng(0x2545_f491_4f6c_dd1d);

    for _ in 0..2000 {
        let start = (rng.next() >> 17) & !0xfff;
        let pages = rng.next() % 4096 + 1;
        let end = start + pages * 0x1000;
        let prefixes = calculate_prefix_list(start, end).unwrap();
        assert_exact_cover(start, end, &prefixes);
        // nothing smaller than a page can appear
        assert!(prefixes.iter().all(|p| p.length() <= 52), "0x{start:x}-0x{end:x}");
    }
}

#[test]
fn test_address_space_boundaries() {
    let prefixes = calculate_prefix_list(1, u64::MAX).unwrap();
    assert_exact_cover(1, u64::MAX, &prefixes);
    assert_eq!(prefixes.len(), 126);

    let prefixes = calculate_prefix_list(u64::MAX - 100, u64::MAX).unwrap();
    assert_exact_cover(u64::MAX - 100, u64::MAX, &prefixes);

    let prefixes = calculate_prefix_list(1 << 63, u64::MAX).unwrap();
    assert_exact_cover(1 << 63, u64::MAX, &prefixes);
    assert_eq!(prefixes.len(), 63);

    let prefixes = calculate_prefix_list(0, 1).unwrap();
    assert_eq!(prefixes, vec![Prefix::new(0, 64).unwrap()]);
}

#[test]
fn test_degenerate_and_reversed_ranges() {
    for x in [0, 1, 10, 4096, 0x55ff_3f68_a000, u64::MAX] {
        assert_eq!(calculate_prefix_list(x, x), Ok(vec![]));
    }

    assert_eq!(
        calculate_prefix_list(4096, 0),
        Err(PrefixError::InvalidRange { start: 4096, end: 0 })
    );
    assert_eq!(
        calculate_prefix_list(u64::MAX, 0).unwrap_err(),
        PrefixError::InvalidRange { start: u64::MAX, end: 0 }
    );
    assert!(PrefixIter::new(2, 1).is_err());
}
