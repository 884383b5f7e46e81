//! Integration tests for common swagforge workflows.
//!
//! These tests drive the public API the way the CLI does: decode a plugin
//! payload, layer configuration, generate and write the document.

use serde_json::{Value, json};
use swagforge::DEFINITIONS_PREFIX;
use swagforge::prelude::*;
use swagforge_config::ConfigLoader;

// =============================================================================
// Fixtures
// =============================================================================

const BLOG_PAYLOAD: &str = r#"{
  "api": {
    "info": {"properties": {"title": "\"Blog\"", "desc": "\"Posts and comments\"", "version": "\"v1\""}},
    "types": [
      {
        "kind": "struct",
        "name": "Audit",
        "members": [
          {"name": "CreatedAt", "type": {"kind": "primitive", "name": "int64"}, "tag": "`json:\"created_at\"`"}
        ]
      },
      {
        "kind": "struct",
        "name": "Post",
        "members": [
          {"name": "Id", "type": {"kind": "primitive", "name": "int64"}, "tag": "`json:\"id\"`"},
          {"name": "Title", "type": {"kind": "primitive", "name": "string"}, "tag": "`json:\"title\" validate:\"max=120\"`"},
          {"name": "Status", "type": {"kind": "primitive", "name": "string"}, "tag": "`json:\"status,options=draft|published,default=draft\"`"},
          {"type": {"kind": "struct", "name": "Audit"}, "is_inline": true}
        ]
      },
      {
        "kind": "struct",
        "name": "ListPostsReq",
        "members": [
          {"name": "Page", "type": {"kind": "primitive", "name": "int"}, "tag": "`form:\"page,default=1,range=[1:1000]\"`"},
          {"name": "Token", "type": {"kind": "primitive", "name": "string"}, "tag": "`header:\"X-Token\"`"}
        ]
      },
      {
        "kind": "struct",
        "name": "PostIdReq",
        "members": [
          {"name": "Id", "type": {"kind": "primitive", "name": "int64"}, "tag": "`path:\"id\"`"}
        ]
      }
    ],
    "service": {
      "name": "BlogService",
      "groups": [
        {
          "annotation": {"properties": {"prefix": "/v1", "group": "posts", "jwt": "Auth"}},
          "routes": [
            {
              "method": "get",
              "path": "/posts",
              "handler": "ListPosts",
              "request_type": {"kind": "struct", "name": "ListPostsReq"},
              "response_type": {"kind": "array", "value": {"kind": "struct", "name": "Post"}},
              "docs": ["list posts"]
            },
            {
              "method": "delete",
              "path": "/posts/:id",
              "handler": "DeletePost",
              "request_type": {"kind": "struct", "name": "PostIdReq"},
              "at_doc": {"properties": {"description": "\"remove a post\""}, "text": ""}
            }
          ]
        }
      ]
    }
  },
  "api_file_path": "blog.api",
  "style": "",
  "dir": "docs"
}"#;

fn blog() -> Plugin {
    Plugin::from_json(BLOG_PAYLOAD).unwrap()
}

fn as_value(document: &SwaggerDocument) -> Value {
    serde_json::to_value(document).unwrap()
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_payload_to_document() {
    let document = generate(&blog().api, &GeneratorConfig::default()).unwrap();
    let doc = as_value(&document);

    assert_eq!(doc["info"]["title"], "Blog");
    assert_eq!(doc["info"]["description"], "Posts and comments");
    assert_eq!(doc["info"]["version"], "v1");

    let list = &doc["paths"]["/v1/posts"]["get"];
    assert_eq!(list["operationId"], "ListPosts");
    assert_eq!(list["tags"], json!(["blogservice/posts"]));
    assert_eq!(list["security"], json!([{"apiKey": []}]));
    assert_eq!(
        list["responses"]["200"]["schema"],
        json!({"type": "array", "items": {"$ref": "#/definitions/Post"}})
    );

    let params = list["parameters"].as_array().unwrap();
    let page = params.iter().find(|p| p["name"] == "page").unwrap();
    assert_eq!(page["in"], "query");
    assert_eq!(page["type"], "integer");
    assert_eq!(page["default"], 1);
    assert_eq!(page["minimum"], 1);
    assert_eq!(page["maximum"], 1000);

    let token = params.iter().find(|p| p["name"] == "X-Token").unwrap();
    assert_eq!(token["in"], "header");
}

#[test]
fn test_delete_route_with_path_parameter() {
    let doc = as_value(&generate(&blog().api, &GeneratorConfig::default()).unwrap());
    let delete = &doc["paths"]["/v1/posts/{id}"]["delete"];

    assert_eq!(delete["description"], "remove a post");
    assert_eq!(
        delete["parameters"],
        json!([{"name": "id", "in": "path", "required": true, "type": "integer", "format": "int64"}])
    );
    assert_eq!(delete["responses"]["200"]["description"], "A successful response.");
}

#[test]
fn test_named_embedded_struct_is_merged() {
    let document = generate(&blog().api, &GeneratorConfig::default()).unwrap();
    let post = &document.definitions["Post"];
    let properties = post.properties.as_ref().unwrap();

    let keys: Vec<_> = properties.keys().map(String::as_str).collect();
    assert_eq!(keys, ["created_at", "id", "title", "status"]);
    assert_eq!(post.required, ["id", "title", "status"]);

    let status = as_value(&document)["definitions"]["Post"]["properties"]["status"].clone();
    assert_eq!(status["enum"], json!(["draft", "published"]));
    assert_eq!(status["default"], "draft");
}

#[test]
fn test_references_resolve_with_wrapper() {
    let config = GeneratorConfig {
        pack: Some("Envelope".to_string()),
        ..Default::default()
    };
    let document = generate(&blog().api, &config).unwrap();

    for reference in document.references() {
        let name = reference.strip_prefix(DEFINITIONS_PREFIX).unwrap();
        assert!(document.definitions.contains_key(name), "dangling {}", reference);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let plugin = blog();
    let config = GeneratorConfig {
        host: Some("blog.example.com".to_string()),
        schemes: Some("https".to_string()),
        ..Default::default()
    };

    let first = generate(&plugin.api, &config).unwrap().to_json_pretty().unwrap();
    let second = generate(&plugin.api, &config).unwrap().to_json_pretty().unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_feeds_generator() {
    let loader = ConfigLoader::new(swagforge_config::FileFormat::Toml);
    let value = loader
        .parse("host = \"cfg.example.com\"\nschemes = \"wss\"\ntag_naming = \"pascal\"\n")
        .unwrap();

    let mut config = GeneratorConfig::default();
    config.merge_value(&value).unwrap();
    config.validate().unwrap();

    let doc = as_value(&generate(&blog().api, &config).unwrap());
    assert_eq!(doc["host"], "cfg.example.com");
    assert_eq!(doc["schemes"], json!(["wss"]));
    assert_eq!(doc["paths"]["/v1/posts"]["get"]["tags"], json!(["BlogService/posts"]));
}

// =============================================================================
// Output
// =============================================================================

#[test]
fn test_write_to_payload_dir() {
    let temp = tempfile::tempdir().unwrap();
    let plugin = blog();
    let config = GeneratorConfig::default();

    let document = generate(&plugin.api, &config).unwrap();
    let dir = temp.path().join(&plugin.dir);
    let path = write_document(&document, &dir, &config.filename).unwrap();

    assert_eq!(path, dir.join("swagger.json"));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, document.to_json_pretty().unwrap());
}
