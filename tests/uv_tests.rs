mod support;

use nalgebra::Point2;
use support::{approx_eq, full_strip, planar_uvs};
use symrs::{
    algorithm::uv::{
        FaceIslandResolver, IslandSet, PreviewState, TaggedFaces, UvIsland, WeightMembership,
        axis_from_uv, island_faces, island_mean_v, mirror_uvs, offset_from_cursor, reflect_u,
    },
    errors::{Skipped, SymmetryError},
    float_types::Real,
    mesh::{Mesh, MirrorAxis, MirrorDirection, MirroredSelection, VertexGroups},
};

fn sleeve_islands() -> IslandSet {
    IslandSet::with_default().with(UvIsland::new("Sleeve").with_axis(0.25))
}

/// Full strip with planar UVs, the two -X quads tagged as `Sleeve`.
fn tagged_strip() -> Mesh {
    let mesh = full_strip();
    let uvs = planar_uvs(&mesh);
    mesh.with_uvs(uvs)
        .with_uv_islands(sleeve_islands())
        .with_face_islands(vec![1, 1, 0, 0])
}

fn negative_half(mesh: &Mesh) -> MirroredSelection {
    MirroredSelection::from_sign_test(
        &mesh.positions,
        MirrorAxis::X,
        MirrorDirection::PositiveToNegative,
    )
}

#[test]
fn sleeve_reflects_about_its_own_axis() {
    assert!(approx_eq(reflect_u(0.30, 0.25), 0.20, 1e-6));

    let mut mesh = tagged_strip();
    let selection = negative_half(&mesh);
    let islands = sleeve_islands();

    let skipped = mirror_uvs(&mut mesh, &islands, &TaggedFaces, &selection).unwrap();
    assert!(skipped.is_empty());

    // loop 0 is vertex 0 at x = -2, planar u = 0.30
    let uvs = mesh.uvs.as_ref().unwrap();
    assert!(approx_eq(uvs[0].x, 0.20, 1e-6));
    assert!(approx_eq(uvs[0].y, 0.0, 1e-6));
}

#[test]
fn faces_on_the_kept_side_or_plane_are_untouched() {
    let mut mesh = tagged_strip();
    let before = mesh.uvs.clone().unwrap();
    let selection = negative_half(&mesh);

    mirror_uvs(&mut mesh, &sleeve_islands(), &TaggedFaces, &selection).unwrap();

    let after = mesh.uvs.as_ref().unwrap();
    // faces 2 and 3 only touch the plane and the +X side
    assert_eq!(&after[8..16], &before[8..16]);
    assert_ne!(&after[0..8], &before[0..8]);
}

#[test]
fn reflection_is_self_inverse() {
    for axis in [0.0, 0.25, 0.5, 0.8] {
        for k in 0..20 {
            let u = k as Real / 19.0;
            assert!(approx_eq(reflect_u(reflect_u(u, axis), axis), u, 1e-4));
        }
    }
}

#[test]
fn values_near_the_axis_snap_onto_it() {
    assert_eq!(reflect_u(0.50005, 0.5), 0.5);
    assert_eq!(reflect_u(0.49995, 0.5), 0.5);
}

#[test]
fn empty_island_list_uses_half_u() {
    assert_eq!(IslandSet::default().params(0), (0.5, 0.0));

    let mut mesh = full_strip();
    let uvs = planar_uvs(&mesh);
    mesh = mesh.with_uvs(uvs);
    let selection = negative_half(&mesh);
    mirror_uvs(&mut mesh, &IslandSet::default(), &TaggedFaces, &selection).unwrap();

    // u = 0.30 about 0.5
    assert!(approx_eq(mesh.uvs.as_ref().unwrap()[0].x, 0.70, 1e-6));
}

#[test]
fn offset_shifts_v() {
    let mut mesh = tagged_strip();
    let islands = IslandSet::with_default().with(UvIsland::new("Sleeve").with_axis(0.25).with_offset(1.0));
    let selection = negative_half(&mesh);
    mirror_uvs(&mut mesh, &islands, &TaggedFaces, &selection).unwrap();

    // loop 3 is vertex 5 at (-2, 1)
    let uv = mesh.uvs.as_ref().unwrap()[3];
    assert!(approx_eq(uv.y, 2.0, 1e-6));
}

#[test]
fn missing_uv_layer_is_fatal() {
    let mut mesh = full_strip();
    let selection = negative_half(&mesh);
    assert_eq!(
        mirror_uvs(&mut mesh, &sleeve_islands(), &TaggedFaces, &selection),
        Err(SymmetryError::MissingUvLayer)
    );
}

#[test]
fn non_finite_island_is_rejected_before_writing() {
    let mut mesh = tagged_strip();
    let before = mesh.clone();
    let islands = IslandSet::with_default().with(UvIsland::new("Sleeve").with_axis(Real::NAN));
    let selection = negative_half(&mesh);

    assert_eq!(
        mirror_uvs(&mut mesh, &islands, &TaggedFaces, &selection),
        Err(SymmetryError::NonFiniteIslandParameter("Sleeve".into()))
    );
    assert_eq!(mesh.uvs, before.uvs);
}

#[test]
fn membership_and_tags_agree_on_a_clean_split() {
    let mut groups = VertexGroups::new();
    // vertices of the two -X quads: columns 0..=2 in both rows
    groups
        .add_with("Sleeve", [0, 1, 2, 5, 6, 7].map(|v| (v, 1.0)))
        .unwrap();
    let by_weight = full_strip().with_vertex_groups(groups);
    let by_tag = full_strip().with_face_islands(vec![1, 1, 0, 0]);
    let islands = sleeve_islands();

    assert_eq!(
        WeightMembership.assign(&by_weight, &islands).face_islands,
        TaggedFaces.assign(&by_tag, &islands).face_islands
    );
    assert_eq!(island_faces(&by_tag, &islands, 1), vec![0, 1]);
    assert_eq!(island_faces(&by_weight, &islands, 0), vec![2, 3]);
}

#[test]
fn island_without_group_is_reported() {
    let mesh = full_strip();
    let assignment = WeightMembership.assign(&mesh, &sleeve_islands());
    assert_eq!(assignment.face_islands, vec![0; 4]);
    assert_eq!(
        assignment.skipped,
        vec![Skipped::IslandWithoutChannel {
            island: "Sleeve".into()
        }]
    );
}

#[test]
fn cursor_sets_offset_from_mean_v() {
    let mut islands = sleeve_islands();
    let mesh = tagged_strip().with_uv_islands(islands.clone());

    // every Sleeve face spans v = 0..1
    let mean = island_mean_v(&mesh, &islands, 1).unwrap().unwrap();
    assert!(approx_eq(mean, 0.5, 1e-6));

    let offset = offset_from_cursor(&mesh, &mut islands, 1, 2.0).unwrap();
    assert!(approx_eq(offset, 1.5, 1e-6));
    assert_eq!(islands.get(1).unwrap().offset_v, offset);
}

#[test]
fn picked_uv_becomes_the_axis() {
    let mesh = tagged_strip();
    let mut islands = sleeve_islands();

    assert_eq!(axis_from_uv(&mesh, &mut islands, 1, std::iter::empty()).unwrap(), None);
    // loop 1 is vertex 1 at x = -1, planar u = 0.4
    let axis = axis_from_uv(&mesh, &mut islands, 1, [1, 2]).unwrap().unwrap();
    assert!(approx_eq(axis, 0.4, 1e-6));
    assert_eq!(islands.params(1).0, axis);
}

#[test]
fn preview_lifecycle() {
    let mut preview = PreviewState::new();
    assert_eq!(preview.start(&full_strip()), Err(SymmetryError::MissingUvLayer));
    assert!(!preview.is_running());

    let mut mesh = tagged_strip();
    let mut islands = sleeve_islands();
    islands.set_active(1).unwrap();
    mesh.uv_islands = Some(islands);

    assert!(preview.toggle(&mesh).unwrap());
    // four quads, four edges each
    assert_eq!(preview.segments().len(), 16);
    // two Sleeve quads, two fan triangles each
    assert_eq!(preview.triangles().len(), 4);
    assert!(approx_eq(preview.cursor().x, 0.25, 1e-6));
    assert!(approx_eq(preview.cursor().y, 0.5, 1e-6));

    // refresh reflects island edits
    if let Some(islands) = mesh.uv_islands.as_mut() {
        islands.set_offset_v(1, 1.0).unwrap();
    }
    preview.refresh(&mesh).unwrap();
    assert!(approx_eq(preview.cursor().y, 1.5, 1e-6));
    assert!(preview.triangles().iter().flatten().all(|uv| uv.y >= 1.0 - 1e-6));

    assert!(!preview.toggle(&mesh).unwrap());
    assert!(preview.segments().is_empty());
    assert!(preview.triangles().is_empty());
    assert_eq!(preview.cursor(), Point2::origin());

    // refresh while stopped does nothing
    preview.refresh(&mesh).unwrap();
    assert!(preview.segments().is_empty());
}

#[test]
fn preview_cursor_reads_the_active_island_itself() {
    // no default island in front: island 0 is a named island
    let islands = IslandSet::default().with(UvIsland::new("Sleeve").with_axis(0.25).with_offset(1.0));
    assert_eq!(islands.params(0), (0.5, 0.0));

    let mesh = tagged_strip()
        .with_uv_islands(islands)
        .with_face_islands(vec![0; 4]);
    let mut preview = PreviewState::new();
    preview.start(&mesh).unwrap();

    assert!(approx_eq(preview.cursor().x, 0.25, 1e-6));
    assert!(approx_eq(preview.cursor().y, 1.5, 1e-6));
}
