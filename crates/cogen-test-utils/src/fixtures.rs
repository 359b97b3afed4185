//! Canned model responses, shaped like what real providers return

/// ERC721 answer that names the contract after the standard itself
pub const ERC721_RESPONSE: &str = r#"Here is an ERC721 contract based on OpenZeppelin:

```solidity
// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "@openzeppelin/contracts/token/ERC721/ERC721.sol";
import "@openzeppelin/contracts/access/Ownable.sol";

contract ERC721 is ERC721, Ownable {
    uint256 private _nextTokenId;

    constructor(address initialOwner) ERC721("ERC721", "NFT") Ownable(initialOwner) {}

    function safeMint(address to) public onlyOwner returns (uint256) {
        uint256 tokenId = _nextTokenId++;
        _safeMint(to, tokenId);
        return tokenId;
    }
}
```

You can deploy it with Hardhat."#;

/// Unfenced answer with a hyphenated contract name
pub const NFT_TREASURY_RESPONSE: &str = r#"Sure! Below is the NFT treasury.

// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import "@openzeppelin/contracts/token/ERC721/ERC721.sol";

contract NFT-Treasury is ERC721 {
    uint256 public immutable cap;
    string private constant NOTE = "vault {locked}";

    constructor(string memory name_, uint256 cap_) ERC721(name_, "NFTT") {
        cap = cap_;
    }

    receive() external payable {}
}

Let me know if you'd like withdrawal logic too."#;

/// ERC20 answer with a supply parameter and no header
pub const ERC20_RESPONSE: &str = r#"```sol
import "@openzeppelin/contracts/token/ERC20/ERC20.sol";

contract SimpleToken is ERC20 {
    constructor(uint256 initialSupply, bool mintable) ERC20("SimpleToken", "STK") {
        if (mintable) {
            _mint(msg.sender, initialSupply);
        }
    }
}
```"#;

/// Refusal with no code
pub const PROSE_ONLY_RESPONSE: &str =
    "I'm sorry, but I can't produce a contract from that description. Could you tell me more about what the treasury should do?";

/// Answer cut off by the token limit
pub const TRUNCATED_RESPONSE: &str = r#"```solidity
// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

contract Vault {
    mapping(address => uint256) public balances;

    function deposit() external payable {
        balances[msg.sender] += msg.value;
"#;
