//! Aggregation throughput: builds per second for an empty and a fully equipped build.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use loadout::combat::{aggregate, total_melee_damage, DamageInputs};
use loadout::data::{Build, EquipmentItem, PetConstants, PetItem, Progression, Rarity, Slot};

fn full_build() -> Build {
    let mut build = Build::new();
    for (slot, strength) in Slot::ALL.into_iter().zip([10.0, 25.0, 20.0, 5.0, 100.0]) {
        let item = EquipmentItem::new(format!("BENCH_{}", slot.as_str().to_uppercase()))
            .with_stat("STRENGTH", strength)
            .with_stat("HEALTH", 80.0)
            .with_stat("DEFENSE", 45.0)
            .with_stat("CRIT_DAMAGE", 12.5)
            .with_stat("UNKNOWN_STAT", 1.0);
        build.equip(slot, item);
    }
    build.set_pet(PetItem::new("PET_TIGER").with_level(87.0));
    build.progression = Progression {
        combat: 30.0,
        foraging: 20.0,
        magical_power: 600.0,
        base_strength: 5.0,
        base_crit_damage: 5.0,
    };
    build
}

fn pet_constants() -> PetConstants {
    let mut constants = PetConstants::new();
    constants.insert_stats(
        "TIGER",
        Rarity::Legendary,
        [("STRENGTH", 100.0), ("FEROCITY", 25.0), ("CRIT_DAMAGE", 50.0)],
    );
    constants
}

fn bench_aggregate(c: &mut Criterion) {
    let constants = pet_constants();

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(1));

    let empty = Build::new();
    group.bench_function("empty_build", |b| {
        b.iter(|| black_box(aggregate(black_box(&empty), &constants)))
    });

    let full = full_build();
    group.bench_function("full_build", |b| {
        b.iter(|| black_box(aggregate(black_box(&full), &constants)))
    });

    group.bench_function("damage_preview", |b| {
        let inputs = DamageInputs {
            damage: 260.0,
            strength: 350.0,
            crit_damage: 220.0,
            bonus_damage_percent: 120.0,
        };
        b.iter(|| black_box(total_melee_damage(black_box(inputs))))
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
