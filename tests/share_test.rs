//! Integration test: share links carry an export and its options intact.

use crestplan::share::{decode, encode, SharePayload};
use crestplan::{plan_export, IndexCache, PlanOptions, Season};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const EXPORT: &str = "shaman=\"Thrall\"\n\
                      # upgrade_currencies=c:3288:30/c:3290:60\n\
                      # Helm of the Tempest (710)\n\
                      head=,id=237640,bonus_id=12802\n\
                      chest=,id=237643,bonus_id=12352\n";

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn test_decode_inverts_encode() {
    let payload = SharePayload {
        text: EXPORT.to_string(),
        drop_ceiling: Some(701),
        maximal: false,
    };
    let link = encode(&payload).unwrap();
    assert_eq!(decode(&link), Some(payload));
}

#[test]
fn test_random_payloads_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let alphabet: Vec<char> = "abcXYZ019=,/#:\"\n\t é✓".chars().collect();
    for _ in 0..100 {
        let len = rng.gen_range(0..400);
        let text: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let payload = SharePayload {
            text,
            drop_ceiling: rng.gen_bool(0.5).then(|| rng.gen_range(600..800)),
            maximal: rng.gen_bool(0.5),
        };
        let link = encode(&payload).unwrap();
        assert_eq!(decode(&link).as_ref(), Some(&payload));
    }
}

#[test]
fn test_compression_shrinks_repetitive_exports() {
    let text = EXPORT.repeat(20);
    let link = encode(&SharePayload {
        text: text.clone(),
        ..Default::default()
    })
    .unwrap();
    assert!(link.len() < text.len() / 2);
}

// =========================================================================
// Shared plans match local plans
// =========================================================================

#[test]
fn test_decoded_link_plans_identically() {
    let season = Season::builtin().unwrap();
    let options = PlanOptions {
        drop_ceiling: Some(697),
        maximal: true,
    };
    let link = encode(&SharePayload::new(EXPORT, &options)).unwrap();
    let shared = decode(&format!("https://example.invalid/plan{link}")).unwrap();

    let mut cache = IndexCache::new();
    let local = plan_export(EXPORT, &season, &options, &mut cache);
    let remote = plan_export(&shared.text, &season, &shared.options(), &mut cache);
    assert_eq!(local, remote);
    assert_eq!(cache.builds(), 1);
}
