use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use intel_core::{
    run_scan_pass, Cargo, MapObject, NoopPlayerInfoDiscoverer, Owner, Planet, Player, PlayerId,
    PlayerNum, PlayerScan, Rules, ScanFlags, Sighting, World,
};

const PLAYERS: u32 = 8;

fn galaxy(planets: u32) -> World {
    World {
        planets: (1..=planets)
            .map(|num| Planet {
                map_object: MapObject {
                    num,
                    player_num: Owner::Player(PlayerNum(num % PLAYERS)),
                    name: format!("Planet {num}"),
                    ..Default::default()
                },
                cargo: Cargo::new(100, 50, 25, 250),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn scans(planets: u32) -> Vec<PlayerScan> {
    (0..PLAYERS)
        .map(|player| PlayerScan {
            player: PlayerNum(player),
            sightings: (1..=planets)
                .map(|num| Sighting::Planet {
                    num,
                    flags: if num % 3 == 0 {
                        ScanFlags::PENETRATING | ScanFlags::CARGO
                    } else {
                        ScanFlags::empty()
                    },
                })
                .collect(),
        })
        .collect()
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_pass");
    let rules = Rules::default().with_seed(17);

    for planets in [32u32, 128, 512, 1024] {
        let world = galaxy(planets);
        let scans = scans(planets);
        group.bench_with_input(BenchmarkId::new("planets", planets), &planets, |b, _| {
            b.iter_batched(
                || {
                    (0..PLAYERS)
                        .map(|num| {
                            Player::new(
                                PlayerId(u64::from(num)),
                                PlayerNum(num),
                                format!("Player {num}"),
                                world.planets.len(),
                            )
                        })
                        .collect::<Vec<_>>()
                },
                |mut players| {
                    run_scan_pass(
                        &rules,
                        1,
                        &world,
                        &mut players,
                        &scans,
                        &NoopPlayerInfoDiscoverer,
                    )
                    .unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(scan_benches, bench_scan);
criterion_main!(scan_benches);
