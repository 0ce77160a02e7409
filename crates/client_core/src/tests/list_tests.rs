use super::*;

fn vendor(id: i64, number: &str, company: &str) -> Vendor {
    Vendor {
        id: VendorId(id),
        vendor_number: number.to_string(),
        company: company.to_string(),
        ..Vendor::default()
    }
}

fn numbered(count: i64) -> Vec<Vendor> {
    (1..=count)
        .map(|id| vendor(id, &format!("V-{id:03}"), "Acme"))
        .collect()
}

fn ids(rows: &[&Vendor]) -> Vec<i64> {
    rows.iter().map(|vendor| vendor.id.0).collect()
}

fn all_pages(list: &mut VendorListController) -> Vec<i64> {
    let mut seen = Vec::new();
    list.go_to_page(1);
    loop {
        seen.extend(ids(&list.visible_page()));
        let before = list.current_page();
        list.next_page();
        if list.current_page() == before {
            return seen;
        }
    }
}

#[test]
fn twelve_rows_with_page_size_five_span_three_pages() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(12));

    assert_eq!(list.total_pages(), 3);
    list.next_page();
    list.next_page();
    assert_eq!(list.current_page(), 3);
    assert_eq!(ids(&list.visible_page()), vec![11, 12]);

    list.next_page();
    assert_eq!(list.current_page(), 3);
}

#[test]
fn prev_page_stops_at_first_page() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(7));
    list.prev_page();
    assert_eq!(list.current_page(), 1);
}

#[test]
fn empty_results_display_page_one_with_no_rows() {
    let mut list = VendorListController::default();
    assert_eq!(list.total_pages(), 0);
    assert_eq!(list.current_page(), 1);
    assert!(list.visible_page().is_empty());

    list.next_page();
    list.go_to_page(4);
    assert_eq!(list.current_page(), 1);
}

#[test]
fn pages_reconstruct_sorted_results_exactly_once() {
    let companies = ["delta", "Alpha", "charlie", "alpha", "Bravo", "echo", "bravo"];
    let results: Vec<Vendor> = companies
        .iter()
        .enumerate()
        .map(|(index, company)| vendor(index as i64 + 1, "V", company))
        .collect();

    for page_size in 1..=8 {
        let mut list = VendorListController::new(page_size);
        list.replace_results(results.clone());
        list.sort(VendorField::Company);

        let expected = ids(&list.sorted());
        assert_eq!(all_pages(&mut list), expected, "page size {page_size}");
    }
}

#[test]
fn unsorted_list_keeps_received_order() {
    let mut list = VendorListController::new(10);
    list.replace_results(vec![
        vendor(3, "V-3", "Zeta"),
        vendor(1, "V-1", "Alpha"),
        vendor(2, "V-2", "Mid"),
    ]);
    assert_eq!(ids(&list.visible_page()), vec![3, 1, 2]);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let mut list = VendorListController::new(10);
    list.replace_results(vec![
        vendor(1, "V-1", "Beta"),
        vendor(2, "V-2", "Alpha"),
        vendor(3, "V-3", "Beta"),
        vendor(4, "V-4", "Alpha"),
        vendor(5, "V-5", "Beta"),
    ]);

    list.sort(VendorField::Company);
    assert_eq!(ids(&list.sorted()), vec![2, 4, 1, 3, 5]);

    list.sort(VendorField::Company);
    assert_eq!(ids(&list.sorted()), vec![1, 3, 5, 2, 4]);
}

#[test]
fn toggling_the_same_key_twice_returns_to_ascending() {
    let mut list = VendorListController::new(10);
    list.replace_results(vec![
        vendor(1, "V-9", "A"),
        vendor(2, "V-2", "B"),
        vendor(3, "V-5", "C"),
    ]);

    list.sort(VendorField::VendorNumber);
    let ascending = ids(&list.sorted());
    assert_eq!(ascending, vec![2, 3, 1]);

    list.sort(VendorField::VendorNumber);
    assert_eq!(
        list.sort_config().map(|config| config.direction),
        Some(SortDirection::Descending)
    );
    assert_eq!(ids(&list.sorted()), vec![1, 3, 2]);

    list.sort(VendorField::VendorNumber);
    assert_eq!(ids(&list.sorted()), ascending);
}

#[test]
fn switching_sort_key_starts_ascending() {
    let mut list = VendorListController::default();
    list.sort(VendorField::Company);
    list.sort(VendorField::Company);
    list.sort(VendorField::City);
    assert_eq!(
        list.sort_config(),
        Some(SortConfig {
            key: VendorField::City,
            direction: SortDirection::Ascending,
        })
    );
}

#[test]
fn locale_compare_ignores_case_before_breaking_ties() {
    assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
    assert_eq!(locale_compare("Zoo", "apple"), Ordering::Greater);
    assert_eq!(locale_compare("acme", "Acme"), Ordering::Less);
    assert_eq!(locale_compare("Acme", "Acme"), Ordering::Equal);
    assert_eq!(locale_compare("Acm", "acme"), Ordering::Less);
}

#[test]
fn page_size_change_resets_to_first_page() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(30));
    list.go_to_page(4);
    assert_eq!(list.current_page(), 4);

    list.set_page_size(25);
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.total_pages(), 2);

    list.set_page_size(0);
    assert_eq!(list.page_size(), 1);
}

#[test]
fn selection_survives_navigation_and_sorting() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(12));
    list.toggle(VendorId(2));
    list.toggle(VendorId(11));

    list.go_to_page(3);
    list.sort(VendorField::VendorNumber);
    list.sort(VendorField::VendorNumber);

    assert!(list.is_selected(VendorId(2)));
    assert!(list.is_selected(VendorId(11)));
    assert_eq!(list.selected_ids().len(), 2);

    list.toggle(VendorId(2));
    assert!(!list.is_selected(VendorId(2)));
}

#[test]
fn toggle_ignores_ids_outside_results() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(3));
    list.toggle(VendorId(99));
    assert!(list.selected_ids().is_empty());
}

#[test]
fn toggle_all_covers_the_full_result_set() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(12));
    list.toggle(VendorId(4));

    list.toggle_all();
    assert!(list.all_selected());
    assert_eq!(list.selected_ids().len(), 12);

    list.toggle_all();
    assert!(list.selected_ids().is_empty());
}

#[test]
fn replacing_results_clears_selection_and_page() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(12));
    list.toggle_all();
    list.go_to_page(3);

    list.replace_results(numbered(4));
    assert!(list.selected_ids().is_empty());
    assert_eq!(list.current_page(), 1);
}

#[test]
fn replace_vendor_keeps_position() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(3));

    let mut updated = vendor(2, "V-002", "Renamed");
    updated.city = "Lyon".into();
    assert!(list.replace_vendor(updated));
    assert_eq!(list.results()[1].company, "Renamed");
    assert_eq!(ids(&list.visible_page()), vec![1, 2, 3]);

    assert!(!list.replace_vendor(vendor(42, "V-042", "Missing")));
}

#[test]
fn removing_ids_keeps_selection_subset_and_page_in_range() {
    let mut list = VendorListController::new(5);
    list.replace_results(numbered(11));
    list.toggle(VendorId(11));
    list.toggle(VendorId(3));
    list.go_to_page(3);

    list.remove_ids(&[VendorId(11)]);
    assert_eq!(list.total_pages(), 2);
    assert_eq!(list.current_page(), 2);
    assert_eq!(
        list.selected_ids().iter().copied().collect::<Vec<_>>(),
        vec![VendorId(3)]
    );
    let listed: BTreeSet<VendorId> = list.results().iter().map(|vendor| vendor.id).collect();
    assert!(list.selected_ids().is_subset(&listed));
}

#[test]
fn accented_companies_sort_with_their_base_letters() {
    let mut list = VendorListController::new(10);
    list.replace_results(
        ["Zeta", "Émile", "Alpha", "éclair", "Fox"]
            .iter()
            .enumerate()
            .map(|(i, company)| vendor(i as i64 + 1, "V", company))
            .collect(),
    );

    list.sort(VendorField::Company);

    let companies: Vec<&str> = list
        .sorted()
        .iter()
        .map(|vendor| vendor.company.as_str())
        .collect();
    assert_eq!(companies, vec!["Alpha", "éclair", "Émile", "Fox", "Zeta"]);
    assert_eq!(locale_compare("eclair", "éclair"), Ordering::Less);
    assert_eq!(locale_compare("éclair", "Éclair"), Ordering::Less);
}

#[test]
fn toggle_all_clears_even_with_duplicate_ids() {
    let mut list = VendorListController::new(5);
    list.replace_results(vec![
        vendor(1, "V-1", "Acme"),
        vendor(1, "V-1", "Acme"),
        vendor(2, "V-2", "Globex"),
    ]);

    list.toggle_all();
    assert!(list.all_selected());
    assert_eq!(list.selected_ids().len(), 2);

    list.toggle_all();
    assert!(list.selected_ids().is_empty());
}
