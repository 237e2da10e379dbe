use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use super::*;

#[test]
fn jobs_run_in_dispatch_order_on_the_ui_thread() {
	let ui = Arc::new(UiThread::spawn("veil-ui-test").unwrap());
	let order = Arc::new(Mutex::new(Vec::new()));
	let (done_tx, done_rx) = std_mpsc::channel();

	for i in 0..5 {
		let order = Arc::clone(&order);
		let ui_ref = Arc::clone(&ui);
		ui.dispatch(Box::new(move || {
			assert!(ui_ref.is_current());
			order.lock().push(i);
		}))
		.unwrap();
	}
	ui.dispatch(Box::new(move || {
		let _ = done_tx.send(());
	}))
	.unwrap();

	done_rx.recv_timeout(Duration::from_secs(5)).expect("ui thread should drain");
	assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
	assert!(!ui.is_current());
}

#[test]
fn delayed_dispatch_lands_on_the_ui_thread() {
	let ui = Arc::new(UiThread::spawn("veil-ui-delayed").unwrap());
	let (tx, rx) = std_mpsc::channel();
	let ui_ref = Arc::clone(&ui);

	let handle = ui.dispatch_after(
		Duration::from_millis(20),
		Box::new(move || {
			let _ = tx.send(ui_ref.is_current());
		}),
	);

	let on_ui = rx.recv_timeout(Duration::from_secs(5)).expect("delayed job should run");
	assert!(on_ui);
	assert!(handle.has_fired());
}

#[test]
fn cancelled_delayed_dispatch_is_dropped() {
	let ui = UiThread::spawn("veil-ui-cancel").unwrap();
	let (tx, rx) = std_mpsc::channel::<()>();

	let handle = ui.dispatch_after(
		Duration::from_millis(50),
		Box::new(move || {
			let _ = tx.send(());
		}),
	);
	handle.cancel();

	assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
}

#[test]
fn panicking_job_does_not_stop_the_thread() {
	let ui = UiThread::spawn("veil-ui-panic").unwrap();
	let (tx, rx) = std_mpsc::channel();

	ui.dispatch(Box::new(|| panic!("boom"))).unwrap();
	ui.dispatch(Box::new(move || {
		let _ = tx.send(());
	}))
	.unwrap();

	rx.recv_timeout(Duration::from_secs(5)).expect("thread should survive a panicking job");
}

#[test]
fn dispatch_after_shutdown_reports_closed() {
	let ui = UiThread::spawn("veil-ui-closed").unwrap();
	ui.shutdown();
	assert!(matches!(ui.dispatch(Box::new(|| {})), Err(UiThreadError::Closed)));
}
