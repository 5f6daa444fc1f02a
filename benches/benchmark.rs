use calcex::{eval_postfix, eval_str, evaluate, parse_postfix, parse_tree, tokenize};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::build_operator_tree;

const BENCH_EXPRESSIONS_NAMES: [&str; 2] = ["flat", "nested"];
const BENCH_EXPRESSIONS_STRS: [&str; 2] = [
    "2 * 6 - 4 - 3 / 2 + 3 * 4 * 1.5 - 32 * 3 + 43 * 4",
    "1.5 - 1 / (2 * (3 - 1 / (0.5 * 4))) + 5 ^ (2 / (0.5 * 4))",
];
const BENCH_REF_VALUES: [f64; 2] = [
    2.0 * 6.0 - 4.0 - 3.0 / 2.0 + 3.0 * 4.0 * 1.5 - 32.0 * 3.0 + 43.0 * 4.0,
    1.5 - 1.0 / (2.0 * (3.0 - 1.0 / (0.5 * 4.0))) + 5.0,
];

fn assert_float_eq(f1: f64, f2: f64) {
    assert!((f1 - f2).abs() < 1e-12);
}

fn calcex_tree(c: &mut Criterion) {
    for ((name, expr_str), ref_val) in BENCH_EXPRESSIONS_NAMES
        .iter()
        .zip(BENCH_EXPRESSIONS_STRS.iter())
        .zip(BENCH_REF_VALUES.iter())
    {
        let tokens = tokenize(expr_str).unwrap();
        let tree = parse_tree(&tokens).unwrap();
        assert_float_eq(evaluate(&tree).unwrap(), *ref_val);
        c.bench_function(format!("calcex_tree_parse_{}", name).as_str(), |b| {
            b.iter(|| parse_tree(black_box(&tokens)).unwrap())
        });
        c.bench_function(format!("calcex_tree_eval_{}", name).as_str(), |b| {
            b.iter(|| evaluate(black_box(&tree)).unwrap())
        });
        c.bench_function(format!("calcex_eval_str_{}", name).as_str(), |b| {
            b.iter(|| eval_str(black_box(expr_str)).unwrap())
        });
    }
}

fn calcex_postfix(c: &mut Criterion) {
    for ((name, expr_str), ref_val) in BENCH_EXPRESSIONS_NAMES
        .iter()
        .zip(BENCH_EXPRESSIONS_STRS.iter())
        .zip(BENCH_REF_VALUES.iter())
    {
        let tokens = tokenize(expr_str).unwrap();
        let postfix = parse_postfix(&tokens).unwrap();
        assert_float_eq(eval_postfix(&postfix).unwrap(), *ref_val);
        c.bench_function(format!("calcex_postfix_parse_{}", name).as_str(), |b| {
            b.iter(|| parse_postfix(black_box(&tokens)).unwrap())
        });
        c.bench_function(format!("calcex_postfix_eval_{}", name).as_str(), |b| {
            b.iter(|| eval_postfix(black_box(&postfix)).unwrap())
        });
    }
}

fn evalexpr(c: &mut Criterion) {
    for (name, expr_str) in BENCH_EXPRESSIONS_NAMES
        .iter()
        .zip(BENCH_EXPRESSIONS_STRS.iter())
    {
        let tree = build_operator_tree(expr_str).unwrap();
        c.bench_function(format!("evalexpr_parse_{}", name).as_str(), |b| {
            b.iter(|| build_operator_tree(black_box(expr_str)).unwrap())
        });
        c.bench_function(format!("evalexpr_eval_{}", name).as_str(), |b| {
            b.iter(|| tree.eval_number().unwrap())
        });
    }
}

criterion_group!(benches, calcex_tree, calcex_postfix, evalexpr);
criterion_main!(benches);
