// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sgf_adapters::FakeRenderFarm;

fn package(id: &str, product: &str, version: &str, host: Option<&str>) -> Package {
    Package {
        package_id: id.to_string(),
        product: product.to_string(),
        version: version.to_string(),
        host_product: host.map(str::to_string),
        environment: Vec::new(),
    }
}

fn registry() -> PackageRegistry {
    PackageRegistry::new(
        vec![
            package("maya-2017", "maya-io", "2017.0", None),
            package("maya-2018.1.2", "maya-io", "2018.1.2", None),
            package("maya-2018.1", "maya-io", "2018.1", None),
            package("vray-3.60.04", "v-ray-maya", "3.60.04", Some("maya-io")),
            package("vray-standalone", "v-ray-standalone", "3.60.04", None),
            package("nuke-11.3v5", "nuke", "11.3.v5", None),
        ],
        vec![
            InstanceType {
                name: "n1-standard-2".to_string(),
                description: "2 core, 7.5GB Mem".to_string(),
                cores: Some(2),
                memory_gb: Some(7.5),
            },
            InstanceType {
                name: "n1-highmem-2".to_string(),
                description: "2 core, 13GB Mem".to_string(),
                cores: Some(2),
                memory_gb: Some(13.0),
            },
        ],
    )
}

#[yare::parameterized(
    exact_beats_prefix = { PackageSpec::host("maya-io", "2018.1"), "maya-2018.1" },
    prefix             = { PackageSpec::host("maya-io", "2018.1.2"), "maya-2018.1.2" },
    plugin_with_host   = { PackageSpec::plugin("v-ray-maya", "3.60.04", "maya-io"), "vray-3.60.04" },
    nuke_v_separator   = { PackageSpec::host("nuke", "11.3v5"), "nuke-11.3v5" },
    major_only         = { PackageSpec::host("maya-io", "2017"), "maya-2017" },
)]
fn resolves_package(spec: PackageSpec, expected_id: &str) {
    assert_eq!(registry().resolve(&spec).unwrap().package_id, expected_id);
}

#[yare::parameterized(
    unknown_product = { PackageSpec::host("houdini", "17.5") },
    unknown_version = { PackageSpec::host("maya-io", "2019") },
    partial_segment = { PackageSpec::host("maya-io", "201") },
    wrong_host      = { PackageSpec::plugin("v-ray-standalone", "3.60.04", "maya-io") },
)]
fn unresolved_package_is_fatal(spec: PackageSpec) {
    let err = registry().resolve(&spec).unwrap_err();
    assert!(matches!(err, EngineError::UnresolvedPackage(_)));
}

#[test]
fn resolve_all_keeps_order() {
    let packages = registry()
        .resolve_all(&[
            PackageSpec::host("maya-io", "2018.1"),
            PackageSpec::plugin("v-ray-maya", "3.60.04", "maya-io"),
        ])
        .unwrap();
    let ids: Vec<_> = packages.iter().map(|p| p.package_id.as_str()).collect();
    assert_eq!(ids, vec!["maya-2018.1", "vray-3.60.04"]);
}

#[test]
fn instance_type_resolves_by_description() {
    assert_eq!(registry().resolve_instance_type("2 core, 13GB Mem").unwrap(), "n1-highmem-2");
}

#[test]
fn unknown_instance_type_is_fatal() {
    let err = registry().resolve_instance_type("64 core, 1TB Mem").unwrap_err();
    assert_eq!(err.to_string(), "unable to find an instance matching '64 core, 1TB Mem'");
}

#[tokio::test]
async fn fetch_reads_farm_catalog() {
    let farm = FakeRenderFarm::new();
    farm.add_package(package("maya-2018.1", "maya-io", "2018.1", None));
    farm.add_instance_type("n1-highmem-2", "2 core, 13GB Mem");

    let registry = PackageRegistry::fetch(&farm).await.unwrap();

    assert_eq!(registry.resolve(&PackageSpec::host("maya-io", "2018.1")).unwrap().package_id, "maya-2018.1");
    assert_eq!(registry.resolve_instance_type("2 core, 13GB Mem").unwrap(), "n1-highmem-2");
}
