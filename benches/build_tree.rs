use std::collections::BTreeMap;
use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
};
use doctree::{to_document, Event, PresentationTag, Scalar, TreeWriter, WriterOptions};
use serde::Serialize;

#[derive(Clone, Serialize)]
struct Owner {
    id: u64,
    login: String,
    site_admin: bool,
}

#[derive(Clone, Serialize)]
struct Repo {
    id: u64,
    name: String,
    description: Option<String>,
    private: bool,
    stargazers_count: u32,
    topics: Vec<String>,
    owner: Owner,
}

#[derive(Clone, Serialize)]
struct Node {
    name: String,
    value: i64,
    flags: Vec<String>,
    children: Vec<Node>,
}

fn make_repos(count: usize) -> Vec<Repo> {
    (0..count)
        .map(|i| Repo {
            id: i as u64,
            name: format!("repo-{i}"),
            description: (i % 3 != 0).then(|| format!("description for repo {i}")),
            private: i % 7 == 0,
            stargazers_count: (i * 13 % 5000) as u32,
            topics: (0..i % 4).map(|t| format!("topic-{t}")).collect(),
            owner: Owner {
                id: (i % 97) as u64,
                login: format!("user{}", i % 97),
                site_admin: i % 211 == 0,
            },
        })
        .collect()
}

fn make_tree(depth: usize, width: usize, seed: u64) -> Node {
    let mut children = Vec::new();
    if depth > 0 {
        for i in 0..width {
            children.push(make_tree(depth - 1, width, seed * 31 + i as u64));
        }
    }
    Node {
        name: format!("node-{seed}"),
        value: seed as i64 - 500,
        flags: vec![format!("f{}", seed % 5), format!("f{}", (seed + 2) % 5)],
        children,
    }
}

fn make_settings(breadth: usize) -> BTreeMap<String, Vec<f64>> {
    (0..breadth)
        .map(|i| (format!("key{i}"), (0..8).map(|j| (i * j) as f64 / 3.0).collect()))
        .collect()
}

/// Flat event stream: an array of `count` small objects.
fn make_events(count: usize) -> Vec<(Event, PresentationTag)> {
    let tag = PresentationTag::Cell;
    let mut events = vec![(Event::StartArray, tag)];
    for i in 0..count {
        events.push((Event::StartObject, tag));
        events.push((Event::PropertyName("id".into()), PresentationTag::Label));
        events.push((Event::Value(Scalar::Integer(i as i128)), tag));
        events.push((Event::PropertyName("ok".into()), PresentationTag::Label));
        events.push((Event::Value(Scalar::Boolean(i % 2 == 0)), tag));
        events.push((Event::PropertyName("note".into()), PresentationTag::Label));
        events.push((Event::Value(Scalar::string(None)), tag));
        events.push((Event::EndObject, tag));
    }
    events.push((Event::EndArray, tag));
    events
}

fn bench_serialize<T: Serialize>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, value: &T) {
    let options = WriterOptions::default();
    group.bench_function(BenchmarkId::new("doctree", name), |b| {
        b.iter(|| {
            let doc = to_document(black_box(value), &options).unwrap();
            black_box(doc);
        });
    });
    group.bench_function(BenchmarkId::new("json_value", name), |b| {
        b.iter(|| {
            let value = serde_json::to_value(black_box(value)).unwrap();
            black_box(value);
        });
    });
}

fn criterion_config() -> Criterion {
    if std::env::var("DOCTREE_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(10)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let repos = make_repos(2000);
    let deep_tree = make_tree(5, 3, 1);
    let settings = make_settings(200);
    let events = make_events(2000);

    let mut serialize = c.benchmark_group("serialize");
    bench_serialize(&mut serialize, "repos", &repos);
    bench_serialize(&mut serialize, "deep_tree", &deep_tree);
    bench_serialize(&mut serialize, "settings_map", &settings);
    serialize.finish();

    let mut events_group = c.benchmark_group("events");
    events_group.bench_function("write", |b| {
        b.iter(|| {
            let mut writer = TreeWriter::new();
            for (event, tag) in black_box(&events).iter().cloned() {
                writer.write(event, tag).unwrap();
            }
            black_box(writer.finish().unwrap());
        });
    });
    let doc = {
        let mut writer = TreeWriter::new();
        for (event, tag) in events.iter().cloned() {
            writer.write(event, tag).unwrap();
        }
        writer.finish().unwrap()
    };
    events_group.bench_function("replay", |b| {
        b.iter(|| black_box(black_box(&doc).events()));
    });
    events_group.bench_function("paths", |b| {
        b.iter(|| {
            let root = doc.root().unwrap();
            let total: usize = root.descendants().map(|node| node.path().len()).sum();
            black_box(total)
        });
    });
    events_group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
