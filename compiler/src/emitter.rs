use std::path::Path;

/// Token in every template that is replaced by the input file's base name.
pub const PLACEHOLDER: &str = "FIXME";

/// One generated artifact kind: written to `<base>.<suffix>.<extension>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub suffix:    &'static str,
    pub extension: &'static str,
    pub template:  &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents:  String,
}

const SERVER_TEMPLATE: &str = r#"'use strict'

const net = require('net')
const proto = require('./FIXME.proto.js')
const handlers = require('./FIXME.service.js')

const server = net.createServer(sock => {
  sock.on('data', data => {
    const { func, args } = proto.unmarshal(data)
    const ret = handlers[func](...args)
    sock.end(proto.marshal({ ret: ret }))
  })
})

server.listen({
  host: 'localhost',
  port: 8080,
  exclusive: true
})
"#;

const CLIENT_TEMPLATE: &str = r#"'use strict'

const net = require('net')
const proto = require('./FIXME.proto.js')

const call = (func, ...args) => new Promise((resolve, reject) => {
  const client = net.createConnection({ host: 'localhost', port: 8080 }, () => {
    client.write(proto.marshal({ func, args }))
  })

  client.on('data', data => {
    resolve(proto.unmarshal(data).ret)
    client.end()
  })
  client.on('error', reject)
})

module.exports = { call }
"#;

const PROTO_TEMPLATE: &str = r#"'use strict'

// Wire format for FIXME.
const marshal = obj => Buffer.from(JSON.stringify(obj), 'utf-8')
const unmarshal = data => JSON.parse(data.toString('utf-8'))

module.exports = { marshal, unmarshal }
"#;

const SERVICE_TEMPLATE: &str = r#"'use strict'

// Procedure handlers for FIXME, keyed by procedure name.
module.exports = {
}
"#;

/// Emitted artifact kinds, in output order.
pub const ARTIFACTS: [Artifact; 4] = [
    Artifact { suffix: "server",  extension: "js", template: SERVER_TEMPLATE },
    Artifact { suffix: "client",  extension: "js", template: CLIENT_TEMPLATE },
    Artifact { suffix: "proto",   extension: "js", template: PROTO_TEMPLATE },
    Artifact { suffix: "service", extension: "js", template: SERVICE_TEMPLATE },
];

/// File name without its directory and final extension.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Renders every entry of [`ARTIFACTS`] for `base`.
pub fn emit(base: &str) -> Vec<GeneratedFile> {
    ARTIFACTS
        .iter()
        .map(|artifact| GeneratedFile {
            file_name: format!("{}.{}.{}", base, artifact.suffix, artifact.extension),
            contents:  artifact.template.replace(PLACEHOLDER, base),
        })
        .collect()
}
