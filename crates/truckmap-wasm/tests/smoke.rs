use wasm_bindgen_test::*;

use truckmap_wasm::{marker_label, rating_glyphs, shorten_website, website_target};

#[wasm_bindgen_test]
fn labels_cycle_through_the_alphabet() {
    assert_eq!(marker_label(0), "A");
    assert_eq!(marker_label(25), "Z");
    assert_eq!(marker_label(26), "A");
}

#[wasm_bindgen_test]
fn rating_bar_has_five_glyphs() {
    assert_eq!(rating_glyphs(3.4), "✭✭✭✩✩");
    assert_eq!(rating_glyphs(4.5), "✭✭✭✭✭");
    assert_eq!(rating_glyphs(0.0).chars().count(), 5);
}

#[wasm_bindgen_test]
fn website_keeps_full_target() {
    let url = "https://www.veracruztacos.example/menu?lang=en";
    assert_eq!(shorten_website(url), "https://www.veracruztacos.example/");
    assert_eq!(website_target(url), url);
}

#[wasm_bindgen_test]
fn bare_host_gets_a_scheme() {
    assert_eq!(shorten_website("pueblo-viejo.example"), "http://pueblo-viejo.example/");
    assert_eq!(website_target("pueblo-viejo.example"), "http://pueblo-viejo.example/");
}
