use ratatui_datatable_core::table::TableConfig;
use ratatui_datatable_core::table::TableController;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;

fn generation(tag: usize, n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| vec![format!("g{tag}"), format!("{:05}", (i * 7) % n)])
        .collect()
}

#[test]
fn readers_never_see_a_mixed_generation() {
    let t = Arc::new(TableController::new(TableConfig::with_headers(["gen", "key"])).unwrap());
    t.set_data(generation(0, 64)).unwrap();
    t.on_header_clicked(1);

    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let t = t.clone();
        let done = done.clone();
        thread::spawn(move || {
            for tag in 1..200 {
                t.set_data(generation(tag, 32 + tag % 64)).unwrap();
                if tag % 3 == 0 {
                    t.on_filter_changed(1, if tag % 2 == 0 { "1" } else { "" });
                }
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let t = t.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut slots = t.new_row_template();
                while !done.load(Ordering::SeqCst) {
                    t.with_view(|view, store| {
                        let rows = view.rows(store).collect::<Vec<_>>();
                        if let Some(first) = rows.first() {
                            let tag = first.cell(0).unwrap();
                            assert!(rows.iter().all(|r| r.cell(0) == Some(tag)));
                        }
                        let keys: Vec<&str> = rows.iter().filter_map(|r| r.cell(1)).collect();
                        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
                    });

                    // A stale index is a no-op, never a panic.
                    let n = t.row_count();
                    if !t.populate_row(n + 5, &mut slots) {
                        assert!(slots.cells().iter().all(String::is_empty));
                    }
                    let _ = t.populate_row(n.saturating_sub(1), &mut slots);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(t.total_rows(), 32 + 199 % 64);
}

#[test]
fn refresh_fires_once_per_successful_mutation() {
    let t = TableController::new(TableConfig::with_headers(["a"])).unwrap();
    let refreshes = Arc::new(AtomicUsize::new(0));
    let counter = refreshes.clone();
    t.set_on_refresh(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    t.set_data(vec![vec!["x".into()]]).unwrap();
    t.on_filter_changed(0, "x");
    t.on_header_clicked(0);
    assert!(t.set_data(vec![vec!["x".into(), "y".into()]]).is_err());
    assert!(!t.on_header_clicked(4));
    assert!(!t.on_filter_changed(4, "x"));
    assert_eq!(refreshes.load(Ordering::SeqCst), 3);
}

#[test]
fn selection_callback_may_call_back_into_the_table() {
    let t = Arc::new(TableController::new(TableConfig::with_headers(["a"])).unwrap());
    t.set_data(vec![vec!["b".into()], vec!["a".into()]]).unwrap();

    let seen = Arc::new(AtomicUsize::new(usize::MAX));
    {
        let inner = t.clone();
        let seen = seen.clone();
        t.set_on_selected(move |original| {
            // Reading and mutating from the callback must not deadlock.
            let _ = inner.row_count();
            inner.on_filter_changed(0, "");
            seen.store(original, Ordering::SeqCst);
        });
    }
    assert_eq!(t.on_row_selected(0), Some(1));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(t.on_row_selected(9), None);
}
