use criterion::{criterion_group, criterion_main, Criterion};
use engine::{DocumentStatus, SearchServer};

const VOCABULARY: &[&str] = &[
    "cat", "dog", "parrot", "fluffy", "groomed", "white", "black", "collar", "tail", "eyes",
    "starling", "expressive", "fancy", "small", "big",
];

fn corpus_server(documents: i32) -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("a in the and").unwrap();
    for id in 0..documents {
        let text = (0..8)
            .map(|word| VOCABULARY[((id + word) * 7 % VOCABULARY.len() as i32) as usize])
            .collect::<Vec<_>>()
            .join(" ");
        server
            .add_document(id, &text, DocumentStatus::Actual, &[id % 10 - 5])
            .unwrap();
    }
    server
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = corpus_server(10_000);
    c.bench_function("find_top_documents_10k", |b| {
        b.iter(|| server.find_top_documents("fluffy groomed cat -starling").unwrap())
    });
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("index_1k_documents", |b| b.iter(|| corpus_server(1_000)));
}

criterion_group!(benches, bench_find_top_documents, bench_add_document);
criterion_main!(benches);
