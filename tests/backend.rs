//! Backend selection, as seen from outside the crate.

#[cfg(all(feature = "cpal", not(feature = "dummy")))]
#[test]
fn real_backend_by_default() {
	assert_eq!(rtaudio::backend_name(), "cpal");
}

#[cfg(feature = "dummy")]
#[test]
fn dummy_when_forced() {
	assert_eq!(rtaudio::backend_name(), "dummy");

	let names: Vec<String> = rtaudio::devices()
		.unwrap()
		.iter()
		.map(|d| d.name().to_string())
		.collect();
	assert_eq!(names[0], "Dummy Speakers");
}
