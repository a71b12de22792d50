//! Testing utilities for the catalog-convert workspace
//!
//! Sample entities in both dialects and helpers for inspecting emitted YAML.

#![allow(missing_docs)]

use serde_yaml::Value;

pub const COMPONENT_V1: &str = r#"apiVersion: backstage.io/v1alpha1
kind: Component
metadata:
  name: artist-lookup
  description: Artist Lookup
  tags:
    - java
    - data
  links:
    - url: https://example.com/user
      title: Examples Users
      icon: user
    - url: https://example.com/dashboard
      title: Dashboard
      icon: dashboard
  annotations:
    backstage.io/source-template: template:default/springboot-template
    backstage.io/linguist: 'https://github.com/backstage/backstage/tree/master/plugins/playlist'
    backstage.io/managed-by-location: url:https://github.com/example/artist-lookup/catalog-info.yaml
    backstage.io/view-url: https://github.com/example/artist-lookup/catalog-info.yaml
  uid: 9b0a4b3f-1c0e-4e0e-9d57-0d6b6f0c2c11
  etag: 5f1c1d2a
  codeCoverageScore: 60
spec:
  type: service
  lifecycle: experimental
  owner: team-a
  system: artist-engagement-portal
  dependsOn: ['resource:artists-db']
  apiConsumedBy: ['component:www-artist']
"#;

pub const COMPONENT_V2: &str = r#"apiVersion: harness.io/v1
kind: Component
type: service
identifier: stocopy2
name: stocopy2
owner: Harness_Account_All_Users
spec:
  lifecycle: experimental
  system: hyperworkspace
metadata:
  annotations:
    backstage.io/source-location: url:https://bitbucket.org/pipelinefeaturetest/idp/src
  codeCoverageScore: 60
  tags:
    - auto-generated
relations:
  - type: ownedBy
    targetRef: group:default/harness_account_all_users
"#;

pub const API_V1: &str = r#"apiVersion: backstage.io/v1alpha1
kind: API
metadata:
  name: petstore
  description: The petstore API
  tags:
    - store
    - rest
  links:
    - url: https://github.com/swagger-api/swagger-petstore
      title: GitHub Repo
      icon: github
  annotations:
    backstage.io/source-location: url:https://github.com/swagger-api/swagger-petstore
    backstage.io/techdocs-ref: dir:.
spec:
  type: openapi
  lifecycle: experimental
  owner: team-c
  definition:
    $text: ./petstore.oas.yaml
"#;

pub const API_V2: &str = r#"apiVersion: harness.io/v1
kind: API
type: openapi
identifier: petstore
name: petstore
owner: team-c
spec:
  lifecycle: experimental
  definition:
    $text: ./petstore.oas.yaml
metadata:
  description: The petstore API
  tags:
    - store
    - rest
  links:
    - url: https://github.com/swagger-api/swagger-petstore
      title: GitHub Repo
      icon: github
"#;

pub const RESOURCE_V1: &str = r#"apiVersion: backstage.io/v1alpha1
kind: Resource
metadata:
  name: artists-db
  description: Stores artist details
  annotations:
    backstage.io/source-location: url:https://github.com/example/artists-db
    backstage.io/managed-by-origin-location: url:https://github.com/example/catalog.yaml
spec:
  type: database
  owner: team-a
  system: artist-engagement-portal
"#;

pub const RESOURCE_V2: &str = r#"apiVersion: harness.io/v1
kind: Resource
type: database
identifier: artistsdb
name: artists-db
owner: team-a
spec:
  system: artist-engagement-portal
metadata:
  description: Stores artist details
"#;

pub const TEMPLATE_V1: &str = r#"apiVersion: scaffolder.backstage.io/v1beta3
kind: Template
metadata:
  name: create-react-app-template
  title: Create React App Template
  description: Create a new CRA website project
  tags:
    - react
    - cra
spec:
  owner: web@example.com
  type: website
  parameters:
    - title: Provide some simple information
      required:
        - component_id
        - owner
      properties:
        component_id:
          title: Name
          type: string
          ui:field: EntityNamePicker
  steps:
    - id: template
      name: Fetch Skeleton + Template
      action: fetch:template
      input:
        url: ./skeleton
        values:
          component_id: ${{ parameters.component_id }}
  output:
    links:
      - title: Repository
        url: ${{ steps.publish.output.remoteUrl }}
"#;

pub const WORKFLOW_V2: &str = r#"apiVersion: harness.io/v1
kind: Workflow
name: Create JAVA based new service
identifier: create_java_based_new_service
type: service
owner: backend-group
metadata:
  description: A Java-based microservice built using Spring Boot.
  icon: java
  tags:
    - java
    - springboot
spec:
  lifecycle: production
  parameters:
    - title: Service Details
      required:
        - service_name
      properties:
        service_name:
          title: Name of your new service
          type: string
          maxLength: 15
  steps:
    - id: trigger
      name: Creating your application
      action: trigger:harness-custom-pipeline
      input:
        showOutputVariables: true
"#;

/// Parse emitted YAML into a value
pub fn parse_yaml(text: &str) -> Value {
    serde_yaml::from_str(text).expect("emitted YAML must parse")
}

/// Value at a dotted path (`metadata.annotations`)
pub fn at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| current.get(segment))
}

/// String at a dotted path
pub fn str_at<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    at(value, path).and_then(Value::as_str)
}

/// Keys of the mapping at a dotted path, in document order
pub fn keys_at<'a>(value: &'a Value, path: &str) -> Vec<&'a str> {
    at(value, path)
        .and_then(Value::as_mapping)
        .map(|map| map.keys().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
