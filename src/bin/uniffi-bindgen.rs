// Runs the UniFFI binding generator against the compiled `socialqr` cdylib.
fn main() {
    uniffi::uniffi_bindgen_main()
}
