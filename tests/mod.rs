mod helpers;

#[test]
fn fixtures_are_present_and_readable() {
    let hotels = helpers::read_fixture("hotels.csv");
    let clean = helpers::read_fixture("clean.csv");

    assert!(hotels.starts_with(b"name,uri,stars"));
    assert!(clean.starts_with(b"name,uri,stars"));
    assert_ne!(hotels, clean);
}
