use leads_dashboard::config::MapConfig;
use leads_dashboard::controller::compute_artifacts;
use leads_dashboard::data::parse_leads;
use leads_dashboard::filter::filter;
use leads_dashboard::types::{Dataset, Selector};

const TWO_LEADS: &str = "name,latitude,longitude,monthly_total_income,source,call_id\n\
                         A,10,20,100,web,1\n\
                         B,30,40,300,ref,2\n";

fn load(csv: &str) -> Dataset {
    parse_leads(csv.as_bytes()).unwrap()
}

fn name(s: &str) -> Selector {
    Selector::Name(s.to_string())
}

#[test]
fn all_selects_everything() {
    let dataset = load(TWO_LEADS);
    let artifacts = compute_artifacts(&dataset, &Selector::All, &MapConfig::default());

    assert_eq!(artifacts.summary[0].average, 200.0);
    assert_eq!(artifacts.summary[1].average, 2.0);
    assert_eq!(artifacts.map.point_count(), 2);
}

#[test]
fn single_name_narrows_every_view() {
    let dataset = load(TWO_LEADS);
    assert_eq!(filter(&dataset, &name("A")).len(), 1);

    let artifacts = compute_artifacts(&dataset, &name("A"), &MapConfig::default());
    assert_eq!(artifacts.summary[0].average, 100.0);
    assert_eq!(artifacts.summary[1].average, 1.0);
    assert_eq!(artifacts.map.point_count(), 1);
    assert_eq!(artifacts.box_plot.groups.len(), 1);
    assert_eq!(artifacts.box_plot.groups[0].source, "web");
}

#[test]
fn absent_name_degrades_gracefully() {
    let dataset = load(TWO_LEADS);
    assert!(filter(&dataset, &name("C")).is_empty());

    let artifacts = compute_artifacts(&dataset, &name("C"), &MapConfig::default());
    assert_eq!(artifacts.summary[1].average, 0.0);
    assert!(artifacts.summary[0].average.is_nan());
    assert_eq!(artifacts.map.point_count(), 0);
    assert!(artifacts.box_plot.groups.is_empty());
}

#[test]
fn invalid_latitude_is_off_the_map_but_still_counted() {
    let csv = "name,latitude,longitude,monthly_total_income,source,call_id\n\
               A,oops,20,100,web,1\n\
               B,30,40,300,ref,2\n";
    let dataset = load(csv);
    let artifacts = compute_artifacts(&dataset, &Selector::All, &MapConfig::default());

    assert_eq!(artifacts.map.point_count(), 1);
    assert_eq!(artifacts.summary[1].average, 2.0);
}

#[test]
fn shared_source_forms_one_box() {
    let csv = "name,latitude,longitude,monthly_total_income,source,call_id\n\
               A,10,20,100,web,1\n\
               B,30,40,300,web,2\n";
    let dataset = load(csv);
    let artifacts = compute_artifacts(&dataset, &Selector::All, &MapConfig::default());

    assert_eq!(artifacts.box_plot.groups.len(), 1);
    assert_eq!(artifacts.box_plot.groups[0].incomes.len(), 2);
    assert_eq!(artifacts.box_plot.data.len(), 1);
}

#[test]
fn map_and_summary_agree_when_coordinates_are_valid() {
    let dataset = load(TWO_LEADS);
    for selector in [Selector::All, name("A"), name("B"), name("C")] {
        let artifacts = compute_artifacts(&dataset, &selector, &MapConfig::default());
        assert_eq!(artifacts.summary[1].average as usize, artifacts.map.point_count());
        assert_eq!(artifacts.selector, selector);
    }
}

#[test]
fn filter_keeps_dataset_order() {
    let csv = "name,latitude,longitude,monthly_total_income,source,call_id\n\
               A,1,1,1,web,1\n\
               B,1,1,2,web,2\n\
               A,1,1,3,web,3\n";
    let dataset = load(csv);

    let all = filter(&dataset, &Selector::All);
    let ids: Vec<_> = all.iter().map(|l| l.call_id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let a = filter(&dataset, &name("A"));
    assert!(a.iter().all(|l| l.name == "A"));
    assert_eq!(a, filter(&dataset, &name("A")));
}
