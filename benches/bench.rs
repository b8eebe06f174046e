#[macro_use]
extern crate criterion;

use criterion::Criterion;
use syslog_courier::decode_unknown;

fn decode_bench(c: &mut Criterion) {
    let rfc5424 = "<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 \
                   [exampleSDID@32473 iut=\"3\" eventSource=\"Application\" eventID=\"1011\"] \
                   BOMAn application event log entry...";
    let rfc3164 = "<190>Dec 28 16:49:07 plertrood-thinkpad-x220 nginx: 127.0.0.1 - - \
                   [28/Dec/2019:16:49:07 +0000] \"GET / HTTP/1.1\" 304 0";
    let fortigate = "<111>date=2025-05-13 time=10:00:00 devname=fg eventtime=1 \
                     logid=0004000017 type=traffic subtype=sniffer srcip=10.0.0.1";
    let cef = "<13>CEF:1|Security|threatmanager|1.0|100|worm successfully stopped|10|\
               src=10.0.0.1 dst=2.1.2.2 spt=1232";

    let mut group = c.benchmark_group("decode_unknown");
    group.bench_function("rfc5424", |b| b.iter(|| decode_unknown(rfc5424)));
    group.bench_function("rfc3164", |b| b.iter(|| decode_unknown(rfc3164)));
    group.bench_function("fortigate_kv", |b| b.iter(|| decode_unknown(fortigate)));
    group.bench_function("cef", |b| b.iter(|| decode_unknown(cef)));
    group.finish();
}

criterion_group!(benches, decode_bench);
criterion_main!(benches);
