// ==============================================
// ARC DIAGNOSTIC EVENTS (integration)
// ==============================================
//
// Callback failures are reported as `debug` events from the cache's module
// path. No event needs `K` or `V` to be `Debug`.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use arckit::policy::arc::ArcCache;
use arckit::traits::ValueSource;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Key type without a `Debug` impl.
#[derive(Clone, PartialEq, Eq, Hash)]
struct Opaque(u32);

struct Refusing;

impl ValueSource<Opaque, Vec<u8>> for Refusing {
    type Error = &'static str;

    fn fetch(&mut self, key: &Opaque) -> Result<Vec<u8>, Self::Error> {
        if key.0 == 0 { Err("no such row") } else { Ok(vec![0; key.0 as usize]) }
    }

    fn on_evict(&mut self, _key: &Opaque, _value: &Vec<u8>) -> Result<(), Self::Error> {
        Err("read only")
    }
}

fn capture(run: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("arckit=trace"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    buf.contents()
}

#[test]
fn callback_failures_emit_debug_events() {
    let output = capture(|| {
        let mut cache = ArcCache::new(1, Refusing);
        assert!(cache.get(&Opaque(0)).is_err());
        assert!(cache.get(&Opaque(1)).is_ok());
        assert!(cache.get(&Opaque(2)).is_err());
    });

    assert!(output.contains("fetch callback failed"), "{output}");
    assert!(output.contains("evict callback failed"), "{output}");
    assert!(output.contains("list=\"t1\""), "{output}");
}

#[test]
fn promotions_emit_trace_events() {
    let output = capture(|| {
        let mut cache = ArcCache::new(2, Refusing);
        cache.get(&Opaque(1)).unwrap();
        cache.get(&Opaque(1)).unwrap();
    });

    assert!(output.contains("promoted t1 -> t2"), "{output}");
}
